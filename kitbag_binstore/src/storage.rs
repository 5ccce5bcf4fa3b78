//! Raw-value storage bound to a configuration, with stream persistence.
//!
//! The persisted layout is an 8-byte host-order version identifier followed
//! by records until end of stream; each record is an 8-byte name length, the
//! UTF-8 name, an 8-byte payload length and the payload bytes.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use kitbag_core::bug;
use log::debug;

use crate::configuration::Configuration;
use crate::serdes::SerDes;
use crate::types::{BinstoreError, BinstoreResult, ByteArray, Token, VersionIdentifier};

/// Version acceptance policy when loading a persisted stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    /// Accept only the exact current version. Convenient for callers that
    /// drive migration themselves, loading older schemas one by one.
    OnlyCurrent,
    /// Accept the current version and anything older. Records are matched
    /// by name, unknown names are skipped, and unmentioned settings keep
    /// their defaults.
    MigrateOld,
    /// Skip the version check entirely. Only suitable for throwaway tools.
    AcceptAll,
}

/// Binary settings storage for one configuration.
#[derive(Debug, Clone)]
pub struct Storage {
    cfg: Configuration,
    raws: HashMap<Token, ByteArray>,
}

impl Storage {
    pub fn new(cfg: Configuration) -> Self {
        Self {
            cfg,
            raws: HashMap::new(),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.cfg
    }

    /// Resolves a setting name against the bound configuration.
    pub fn find(&self, name: &str) -> BinstoreResult<Token> {
        self.cfg
            .settings()
            .find_name(name)
            .ok_or(BinstoreError::NoSuchSetting)
    }

    fn check_token(&self, token: Token) {
        if !self.cfg.settings().has(token) {
            bug!("setting token {token} is not registered in this configuration");
        }
    }

    /// Whether `token` currently has a stored raw value.
    pub fn is_stored(&self, token: Token) -> bool {
        self.check_token(token);
        self.raws.contains_key(&token)
    }

    /// Drops every stored raw value; settings read afterwards see their
    /// codec defaults.
    pub fn clear(&mut self) {
        self.raws.clear();
    }

    /// Rewrites `token` with the codec's default encoding.
    pub fn reset_value<S: SerDes>(&mut self, token: Token, serdes: &S) {
        self.check_token(token);
        self.raws.insert(token, serdes.reset());
    }

    /// Reads `token` through `serdes`.
    ///
    /// A missing or undecodable raw value is replaced by the codec default,
    /// which is then returned.
    pub fn get_value<S: SerDes>(&mut self, token: Token, serdes: &S) -> S::Value {
        self.check_token(token);
        if let Some(raw) = self.raws.get(&token) {
            if let Some(value) = serdes.deserialize(raw) {
                return value;
            }
        }
        self.reset_value(token, serdes);
        match self.raws.get(&token).and_then(|raw| serdes.deserialize(raw)) {
            Some(value) => value,
            None => bug!("codec default must deserialize"),
        }
    }

    /// Writes `value` through `serdes`.
    ///
    /// Returns false when the value is outside the codec's accepted range;
    /// the setting is then stored as the codec default instead.
    pub fn set_value<S: SerDes>(&mut self, token: Token, value: &S::Value, serdes: &S) -> bool {
        self.check_token(token);
        match serdes.serialize(value) {
            Some(raw) => {
                self.raws.insert(token, raw);
                true
            }
            None => {
                self.raws.insert(token, serdes.reset());
                false
            }
        }
    }

    /// Writes the version header and every stored record to `dst`.
    pub fn save(&self, dst: &mut dyn Write) -> BinstoreResult<()> {
        dst.write_all(&self.cfg.version().to_ne_bytes())?;
        for (token, setting) in self.cfg.settings().iter() {
            let Some(raw) = self.raws.get(&token) else {
                continue;
            };
            let name = setting.name().as_bytes();
            dst.write_all(&(name.len() as u64).to_ne_bytes())?;
            dst.write_all(name)?;
            dst.write_all(&(raw.len() as u64).to_ne_bytes())?;
            dst.write_all(raw)?;
        }
        Ok(())
    }

    /// Saves into a freshly created file at `path`.
    pub fn save_to_file(&self, path: &Path) -> BinstoreResult<()> {
        let mut dst = BufWriter::new(File::create(path)?);
        self.save(&mut dst)?;
        dst.flush()?;
        Ok(())
    }

    /// Replaces the stored values with the records of a persisted stream.
    ///
    /// Records are matched by setting name; unknown names are skipped.
    /// On any error the stored values are left exactly as they were.
    pub fn load(&mut self, src: &mut dyn Read, strategy: LoadStrategy) -> BinstoreResult<()> {
        let found = read_version(src)?;
        let current = self.cfg.version();
        let acceptable = match strategy {
            LoadStrategy::OnlyCurrent => found == current,
            LoadStrategy::MigrateOld => found <= current,
            LoadStrategy::AcceptAll => true,
        };
        if !acceptable {
            return Err(BinstoreError::BadVersion { current, found });
        }

        let mut incoming: HashMap<Token, ByteArray> = HashMap::new();
        let mut skipped = 0usize;
        while let Some(name_len) = read_length_or_eof(src)? {
            let name = read_name(src, name_len)?;
            let payload_len = read_length(src)?;
            let payload = read_payload(src, payload_len)?;
            match self.cfg.settings().find_name(&name) {
                Some(token) => {
                    if incoming.insert(token, payload).is_some() {
                        return Err(BinstoreError::DuplicatedAssign(name));
                    }
                }
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("skipped {skipped} unknown settings while loading version {found}");
        }

        self.raws = incoming;
        Ok(())
    }

    /// Loads from the file at `path`.
    pub fn load_from_file(&mut self, path: &Path, strategy: LoadStrategy) -> BinstoreResult<()> {
        self.load(&mut BufReader::new(File::open(path)?), strategy)
    }
}

fn read_version(src: &mut dyn Read) -> io::Result<VersionIdentifier> {
    let mut buf = [0u8; 8];
    src.read_exact(&mut buf)?;
    Ok(u64::from_ne_bytes(buf))
}

fn read_length(src: &mut dyn Read) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    src.read_exact(&mut buf)?;
    Ok(u64::from_ne_bytes(buf))
}

/// Reads the next record's length field, or `None` on a clean end of stream.
/// End of stream in the middle of the field is a truncation error.
fn read_length_or_eof(src: &mut dyn Read) -> io::Result<Option<u64>> {
    let mut buf = [0u8; 8];
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stream ends inside a record length",
                ));
            }
            Ok(read) => filled += read,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(Some(u64::from_ne_bytes(buf)))
}

fn read_name(src: &mut dyn Read, len: u64) -> io::Result<String> {
    let raw = read_payload(src, len)?;
    String::from_utf8(raw)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "record name is not UTF-8"))
}

fn read_payload(src: &mut dyn Read, len: u64) -> io::Result<Vec<u8>> {
    let len = usize::try_from(len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "record length overflows"))?;
    let mut buf = vec![0u8; len];
    src.read_exact(&mut buf)?;
    Ok(buf)
}
