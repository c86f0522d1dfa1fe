//! Splitting display-form sender strings.

/// Display name and address taken from a sender string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sender {
    /// Display name (falls back to the address).
    pub name: String,
    /// Address, or empty if none was found.
    pub email: String,
}

impl Sender {
    /// Splits `"Display Name <address>"` or a bare address.
    ///
    /// The last `<` and last `>` delimit the address so that a display name
    /// holding literal angle brackets still parses. No address syntax is
    /// checked.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if let (Some(open), Some(close)) = (raw.rfind('<'), raw.rfind('>'))
            && open < close
        {
            let email = raw[open + 1..close].trim().to_string();
            let name = strip_quotes(raw[..open].trim());
            let name = if name.is_empty() {
                email.clone()
            } else {
                name.to_string()
            };
            return Self { name, email };
        }

        if raw.contains('@') {
            return Self {
                name: raw.to_string(),
                email: raw.to_string(),
            };
        }

        Self {
            name: raw.to_string(),
            email: String::new(),
        }
    }
}

/// Removes one pair of surrounding double quotes.
fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}
