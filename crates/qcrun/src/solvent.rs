use std::{fmt::Display, str::FromStr};

use crate::RunError;

/// which program a solvent name is meant for. xtb and CREST/CENSO disagree
/// about the name of water
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flavor {
    Xtb,
    Crest,
}

/// The implicit solvents supported by ALPB (xtb, CREST) and SMD (CENSO/ORCA)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Solvent {
    Acetone,
    Acetonitrile,
    Aniline,
    Benzaldehyde,
    Benzene,
    Ch2Cl2,
    Chcl3,
    Ccl4,
    Cs2,
    Dioxane,
    Dmf,
    Dmso,
    Ether,
    Ethylacetate,
    Furane,
    Water,
    Hexadecane,
    Hexane,
    Methanol,
    Nitromethane,
    Octanol,
    WetOctanol,
    Phenol,
    Toluene,
    Thf,
}

/// canonical name followed by the accepted aliases
const TABLE: [(Solvent, &str, &[&str]); 25] = {
    use Solvent::*;
    [
        (Acetone, "acetone", &["Aceton", "(CH3)2CO"]),
        (
            Acetonitrile,
            "acetonitrile",
            &["ACN", "Acetonitrile", "Acetonitril", "AcN"],
        ),
        (Aniline, "aniline", &["ANI", "Aniline", "Anil"]),
        (
            Benzaldehyde,
            "benzaldehyde",
            &["BEN", "Benzaldehyde", "Benzal", "Benzaldehyd"],
        ),
        (Benzene, "benzene", &["Benzene", "Benzol"]),
        (
            Ch2Cl2,
            "ch2cl2",
            &["CH2CL2", "CH2Cl2", "DCM", "Dichloromethane", "Dichlormethan"],
        ),
        (
            Chcl3,
            "chcl3",
            &["CHCL3", "CHCl3", "Chloroform", "Chloroforme", "chloroform"],
        ),
        (Ccl4, "ccl4", &["CCl4", "CCL4", "Carbontet", "Tetrachlormethan"]),
        (
            Cs2,
            "cs2",
            &["CS2", "Carbonsulfide", "Carbonsulfid", "carbonsulfide"],
        ),
        (Dioxane, "dioxane", &["Dioxane", "Dioxan"]),
        (
            Dmf,
            "dmf",
            &[
                "DMF",
                "Dimethylformamide",
                "Dimethylformamid",
                "dimethylformamide",
            ],
        ),
        (Dmso, "dmso", &["DMSO", "Me2SO"]),
        (
            Ether,
            "ether",
            &["ETHER", "Ether", "diethylether", "Diethylether"],
        ),
        (
            Ethylacetate,
            "ethylacetate",
            &["ETAC", "Ethylacetat", "Ethylacetate"],
        ),
        (Furane, "furane", &["FUR", "Furan", "furan"]),
        (Water, "h2o", &["water", "WAT", "Water", "Wasser", "H2O"]),
        (Hexadecane, "hexadecane", &["Hexadecane", "hexandecane"]),
        (Hexane, "hexane", &["HEX", "Hexane", "Hexan"]),
        (Methanol, "methanol", &["METH", "Methanol", "MeOH"]),
        (Nitromethane, "nitromethane", &["NIT", "Nitromethane", "Nitromethan"]),
        (Octanol, "octanol", &["OCT", "Oct-OH"]),
        (
            WetOctanol,
            "woctanol",
            &["WOCT", "Water octanol", "Wasser_Octanol"],
        ),
        (Phenol, "phenol", &["PHEN", "Phenol"]),
        (Toluene, "toluene", &["TOL", "Toluene", "Toluol"]),
        (Thf, "thf", &["THF", "Tetrahydrofuran", "tetrahydrofurane"]),
    ]
};

impl Solvent {
    /// look up `alias` among the canonical names and aliases. Exact matches
    /// win over case-insensitive ones
    pub fn lookup(alias: &str) -> Result<Self, RunError> {
        let alias = alias.trim();
        let exact = TABLE.iter().find(|(_, name, aliases)| {
            *name == alias || aliases.contains(&alias)
        });
        if let Some((s, _, _)) = exact {
            return Ok(*s);
        }
        TABLE
            .iter()
            .find(|(_, name, aliases)| {
                name.eq_ignore_ascii_case(alias)
                    || aliases.iter().any(|a| a.eq_ignore_ascii_case(alias))
            })
            .map(|(s, _, _)| *s)
            .ok_or_else(|| {
                RunError::UnknownSolvent(format!(
                    "{alias}; possible solvents are: {}",
                    Self::names().collect::<Vec<_>>().join(", ")
                ))
            })
    }

    /// the canonical names of all of the supported solvents
    pub fn names() -> impl Iterator<Item = &'static str> {
        TABLE.iter().map(|(_, name, _)| *name)
    }

    /// the name CREST and CENSO expect
    pub fn name(&self) -> &'static str {
        TABLE
            .iter()
            .find(|(s, _, _)| s == self)
            .map(|(_, name, _)| *name)
            .unwrap_or_default()
    }

    pub fn name_for(&self, flavor: Flavor) -> &'static str {
        match (self, flavor) {
            (Solvent::Water, Flavor::Xtb) => "water",
            _ => self.name(),
        }
    }
}

impl Display for Solvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Solvent {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}
