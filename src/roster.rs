//! Roster input: the team list supplied by the caller when a league is initialised.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::from_reader;

/// A team entry as supplied by the caller: display name, power rating (1-100, fixed
/// for the life of the league) and an optional badge reference.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamSpec {
    pub name: String,
    pub power: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Reads a roster from a JSON file holding an array of `{name, power, logo?}` entries.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Vec<TeamSpec>, io::Error> {
    let file = File::open(path)?;
    Ok(from_reader(file)?)
}

/// A ready-made roster for demos and tests.
pub fn default_roster() -> Vec<TeamSpec> {
    [
        ("Manchester City", 92),
        ("Real Madrid", 91),
        ("Bayern Munich", 90),
        ("Paris Saint-Germain", 88),
        ("Liverpool", 87),
        ("Barcelona", 86),
        ("Inter Milan", 84),
        ("Arsenal", 83),
    ]
    .into_iter()
    .map(|(name, power)| TeamSpec {
        name: name.into(),
        power,
        logo: None,
    })
    .collect()
}
