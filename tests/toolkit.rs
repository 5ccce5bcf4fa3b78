//! End-to-end smoke test driving several subsystems together, the way a
//! small CLI tool would use them: lex a command line, parse it, persist the
//! result and render a report table.

use std::io::Cursor;

use kitbag::binstore::{
    Configuration, LoadStrategy, ScalarSerDes, Setting, SettingCollection, Storage, StringSerDes,
};
use kitbag::cli::{lexer, Application, CliOption, IntValidator, Parser, StringValidator, Summary};
use kitbag::term::wcwidth;
use kitbag::term::Tabulate;

#[test]
fn command_line_to_settings_to_table() {
    // Schema.
    let mut app = Application::new(Summary::new(
        "report",
        "report",
        "nobody",
        "0.1.0",
        "smoke test tool",
    ));
    let jobs_opt = app.add_option(CliOption::new(Some("j"), Some("jobs"), Some("N"), "workers"));
    let label_opt = app.add_option(CliOption::new(None, Some("label"), Some("TEXT"), "label"));

    // One quoted command line through the lexer into the parser.
    let args = lexer::split("report -j 4 --label 'nightly run'").expect("lex");
    let parser = Parser::from_args(&app, args.iter().map(String::as_str)).expect("parse");
    let jobs: u32 = parser
        .get_value(jobs_opt, &IntValidator::default())
        .expect("jobs value");
    let label = parser
        .get_value(label_opt, &StringValidator)
        .expect("label value");
    assert_eq!((jobs, label.as_str()), (4, "nightly run"));

    // Persist both values and read them back.
    let mut settings = SettingCollection::new();
    let jobs_setting = settings.add(Setting::new("jobs"));
    let label_setting = settings.add(Setting::new("label"));
    let mut storage = Storage::new(Configuration::new(1, settings));
    assert!(storage.set_value(jobs_setting, &jobs, &ScalarSerDes::<u32>::default()));
    assert!(storage.set_value(label_setting, &label, &StringSerDes::default()));

    let mut buffer = Vec::new();
    storage.save(&mut buffer).expect("save");
    storage.clear();
    storage
        .load(&mut Cursor::new(&buffer), LoadStrategy::OnlyCurrent)
        .expect("load");
    assert_eq!(
        storage.get_value(jobs_setting, &ScalarSerDes::<u32>::default()),
        4
    );

    // Render a summary table and sanity-check the alignment maths.
    let mut table = Tabulate::new(2);
    table.set_header(["setting", "value"]);
    table.add_row(["jobs", "4"]);
    table.add_row(["label", label.as_str()]);
    let mut rendered = Vec::new();
    table.render(&mut rendered).expect("render");
    let rendered = String::from_utf8(rendered).expect("UTF-8 output");

    let widths: Vec<usize> = rendered
        .lines()
        .map(|line| wcwidth::str_width(line).expect("measurable line"))
        .collect();
    assert!(widths.windows(2).all(|pair| pair[0] == pair[1]));
}
