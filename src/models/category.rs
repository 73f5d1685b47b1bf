// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fixed report categories offered by the public form.

/// A report category: wire id and display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
}

pub const CATEGORIES: [Category; 12] = [
    Category { id: "theft", name: "Furto" },
    Category { id: "assault", name: "Assalto" },
    Category { id: "vandalism", name: "Vandalismo" },
    Category { id: "drug_activity", name: "Atividade com Drogas" },
    Category { id: "traffic_violation", name: "Infração de Trânsito" },
    Category { id: "domestic_violence", name: "Violência Doméstica" },
    Category { id: "burglary", name: "Arrombamento" },
    Category { id: "robbery", name: "Roubo" },
    Category { id: "homicide", name: "Homicídio" },
    Category { id: "cybercrime", name: "Cibercrime" },
    Category { id: "fraud", name: "Fraude" },
    Category { id: "other", name: "Outro" },
];

/// Look up a category by its wire id.
pub fn find(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}
