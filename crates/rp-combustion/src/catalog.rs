use crate::propellant::{Propellant, PropellantRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropellantCatalogEntry {
    pub propellant: Propellant,
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
}

impl PropellantCatalogEntry {
    pub fn role(&self) -> PropellantRole {
        self.propellant.role()
    }

    /// Exact, case-insensitive match on the canonical id or any alias.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.canonical_id.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }

    /// Substring search used for listing.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }
}

const PROPELLANT_CATALOG: [PropellantCatalogEntry; 7] = [
    PropellantCatalogEntry {
        propellant: Propellant::Lox,
        canonical_id: "LOX",
        display_name: "Liquid Oxygen",
        aliases: &["O2", "O2(L)", "oxygen"],
    },
    PropellantCatalogEntry {
        propellant: Propellant::N2O4,
        canonical_id: "N2O4",
        display_name: "Nitrogen Tetroxide",
        aliases: &["NTO", "N2O4(L)"],
    },
    PropellantCatalogEntry {
        propellant: Propellant::Ethanol,
        canonical_id: "C2H5OH",
        display_name: "Ethanol",
        aliases: &["ethanol", "C2H5OH(L)", "EtOH"],
    },
    PropellantCatalogEntry {
        propellant: Propellant::Rp1,
        canonical_id: "RP1",
        display_name: "RP-1 Kerosene",
        aliases: &["RP-1", "kerosene"],
    },
    PropellantCatalogEntry {
        propellant: Propellant::Methane,
        canonical_id: "CH4",
        display_name: "Methane",
        aliases: &["LCH4", "CH4(L)", "methane"],
    },
    PropellantCatalogEntry {
        propellant: Propellant::Lh2,
        canonical_id: "LH2",
        display_name: "Liquid Hydrogen",
        aliases: &["H2", "H2(L)", "hydrogen"],
    },
    PropellantCatalogEntry {
        propellant: Propellant::Mmh,
        canonical_id: "MMH",
        display_name: "Monomethylhydrazine",
        aliases: &["CH3NHNH2"],
    },
];

pub fn propellant_catalog() -> &'static [PropellantCatalogEntry] {
    &PROPELLANT_CATALOG
}

/// Resolve a propellant by canonical id or alias.
pub fn lookup(name: &str) -> Option<&'static PropellantCatalogEntry> {
    propellant_catalog()
        .iter()
        .find(|entry| entry.matches_name(name))
}

pub fn filter_catalog(query: &str) -> Vec<PropellantCatalogEntry> {
    propellant_catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn canonical_ids_are_unique() {
        let mut seen = HashSet::new();
        for entry in propellant_catalog() {
            assert!(
                seen.insert(entry.canonical_id),
                "duplicate canonical id: {}",
                entry.canonical_id
            );
        }
    }

    #[test]
    fn names_resolve_to_exactly_one_entry() {
        for entry in propellant_catalog() {
            for name in std::iter::once(&entry.canonical_id).chain(entry.aliases) {
                let hits = propellant_catalog()
                    .iter()
                    .filter(|e| e.matches_name(name))
                    .count();
                assert_eq!(hits, 1, "ambiguous name {name}");
            }
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("lox").unwrap().propellant, Propellant::Lox);
        assert_eq!(lookup(" c2h5oh ").unwrap().propellant, Propellant::Ethanol);
        assert_eq!(lookup("RP-1").unwrap().propellant, Propellant::Rp1);
        assert!(lookup("UNOBTAINIUM").is_none());
    }

    #[test]
    fn canonical_id_matches_cea_name() {
        for entry in propellant_catalog() {
            assert_eq!(entry.canonical_id, entry.propellant.cea_name());
        }
    }

    #[test]
    fn search_finds_kerosene() {
        let results = filter_catalog("kero");
        assert!(results.iter().any(|e| e.propellant == Propellant::Rp1));
        assert_eq!(filter_catalog("").len(), propellant_catalog().len());
    }
}
