//! Report objects for text and JSON output

use std::fmt;

use ledger_status::{registry, Description, StatusCode, StatusWord};
use serde::Serialize;

/// Decoded status word report
#[derive(Clone, Debug, Serialize)]
pub struct StatusReport {
    /// Status word in hex
    pub word: String,
    /// Whether the word is the success sentinel
    pub success: bool,
    /// Mnemonic, if the word decomposes
    pub mnemonic: Option<String>,
    /// Whether the word is an OS code allocated in the registry
    pub allocated: bool,
    /// Range / subcategory description
    pub description: Description,
    /// Legacy alias information, if the word is a legacy code
    pub legacy: Option<LegacyReport>,
}

/// Legacy alias report
#[derive(Clone, Debug, Serialize)]
pub struct LegacyReport {
    pub name: &'static str,
    pub summary: String,
    pub value: u8,
    pub canonical: String,
    pub canonical_word: String,
}

impl StatusReport {
    pub fn new(sw: StatusWord) -> Self {
        let description = sw.describe();

        let legacy = sw.legacy().map(|l| {
            let c = l.canonical();
            LegacyReport {
                name: l.name(),
                summary: l.to_string(),
                value: l.into(),
                canonical: mnemonic(c).unwrap_or_default(),
                canonical_word: StatusWord::from(c).to_string(),
            }
        });

        Self {
            word: sw.to_string(),
            success: sw.is_success(),
            mnemonic: description.components.map(|c| c.mnemonic().to_string()),
            allocated: registry::lookup(sw.value()).is_some(),
            description,
            legacy,
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.description;

        write!(f, "{}: ", self.word)?;

        if self.success {
            return write!(f, "success");
        }

        match (&self.mnemonic, &d.components, &self.legacy) {
            (Some(m), Some(c), _) => {
                write!(
                    f,
                    "{m} ({}/{}, identifier 0x{:02x})",
                    d.category, d.subcategory, c.identifier
                )?;
                if !self.allocated && !c.range().is_application() {
                    write!(f, " unallocated")?;
                }
                Ok(())
            }
            (_, _, Some(l)) => write!(
                f,
                "legacy {} ({}), canonical {} ({})",
                l.name, l.summary, l.canonical, l.canonical_word
            ),
            _ => write!(f, "unknown ({}/{})", d.category, d.subcategory),
        }
    }
}

/// Response payload and status report
#[derive(Clone, Debug, Serialize)]
pub struct ResponseReport {
    /// Hex encoded payload
    pub payload: String,
    /// Trailing status
    pub status: StatusReport,
}

impl fmt::Display for ResponseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "payload: {}", self.payload)?;
        write!(f, "status: {}", self.status)
    }
}

/// Registry listing entry
#[derive(Clone, Debug, Serialize)]
pub struct CodeEntry {
    pub word: String,
    pub mnemonic: String,
    pub category: &'static str,
    pub subcategory: &'static str,
}

impl CodeEntry {
    pub fn new(c: StatusCode) -> Self {
        let d = c.describe();

        Self {
            word: StatusWord::from(c).to_string(),
            mnemonic: mnemonic(c).unwrap_or_default(),
            category: d.category,
            subcategory: d.subcategory,
        }
    }
}

impl fmt::Display for CodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}/{}",
            self.word, self.mnemonic, self.category, self.subcategory
        )
    }
}

fn mnemonic(c: StatusCode) -> Option<String> {
    c.decompose().ok().map(|p| p.mnemonic().to_string())
}
