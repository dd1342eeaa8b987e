use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use strum_macros::EnumString;

/// On-disk format of prepared tensor files.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Serialize, Deserialize, EnumString)]
pub enum DumpFormat {
    Bincode,
    Json,
}

impl Display for DumpFormat {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
