use std::fmt;

/// Separator between the client's name and company in a project's client label.
pub const LABEL_SEPARATOR: &str = " - ";

/// Canonical join key for a client name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientKey(String);

impl ClientKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim and lower-case free text for matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Key for a plain client name, as found on ledger entries and clients.
pub fn client_key(name: &str) -> ClientKey {
    ClientKey(normalize(name))
}

/// Key for a `"<name> - <company>"` label. Labels without the separator are
/// taken whole.
pub fn label_key(label: &str) -> ClientKey {
    let name = label
        .split_once(LABEL_SEPARATOR)
        .map_or(label, |(name, _)| name);
    client_key(name)
}
