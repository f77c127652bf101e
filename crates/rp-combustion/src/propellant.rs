//! Propellant definitions.

use std::fmt;

/// Whether a propellant is burned as the oxidizer or as the fuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropellantRole {
    Oxidizer,
    Fuel,
}

impl fmt::Display for PropellantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oxidizer => write!(f, "oxidizer"),
            Self::Fuel => write!(f, "fuel"),
        }
    }
}

/// Liquid propellants known to rocketperf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Propellant {
    /// Liquid oxygen
    Lox,
    /// Nitrogen tetroxide
    N2O4,
    /// Ethyl alcohol
    Ethanol,
    /// Kerosene (RP-1)
    Rp1,
    /// Liquid methane
    Methane,
    /// Liquid hydrogen
    Lh2,
    /// Monomethylhydrazine
    Mmh,
}

impl Propellant {
    pub fn role(self) -> PropellantRole {
        match self {
            Self::Lox | Self::N2O4 => PropellantRole::Oxidizer,
            Self::Ethanol | Self::Rp1 | Self::Methane | Self::Lh2 | Self::Mmh => {
                PropellantRole::Fuel
            }
        }
    }

    /// Name used by the CEA propellant database.
    pub fn cea_name(self) -> &'static str {
        match self {
            Self::Lox => "LOX",
            Self::N2O4 => "N2O4",
            Self::Ethanol => "C2H5OH",
            Self::Rp1 => "RP1",
            Self::Methane => "CH4",
            Self::Lh2 => "LH2",
            Self::Mmh => "MMH",
        }
    }
}

impl fmt::Display for Propellant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cea_name())
    }
}
