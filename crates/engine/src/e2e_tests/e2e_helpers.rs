//! Shared setup for end-to-end tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use brancalonia_domain::ReferenceData;

use crate::infrastructure::pdf_form::test_support::{template_bytes, FixtureField};
use crate::infrastructure::reference_loader::JsonReferenceLoader;

/// The `data/` directory at the workspace root.
pub fn shipped_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..").join("data")
}

pub fn shipped_build(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("builds")
        .join(name)
}

pub fn shipped_data() -> Arc<ReferenceData> {
    Arc::new(JsonReferenceLoader::new(shipped_data_dir()).load_all())
}

/// Write a sheet template with the fields a Morgante build touches.
pub fn write_sheet_template(dir: &Path) -> PathBuf {
    let path = dir.join("brancasheet.pdf");
    let bytes = template_bytes(&[
        FixtureField::Text("Nome"),
        FixtureField::Text("Raça"),
        FixtureField::Checkbox("Força_d10"),
        FixtureField::Checkbox("Vigor_d8"),
        FixtureField::Checkbox("Agilidade_d4"),
        FixtureField::Text("Perícia_1"),
        FixtureField::Checkbox("Perícia_1_d6"),
        FixtureField::Text("Vantagem_1"),
        FixtureField::Text("Complicação_1"),
        FixtureField::Text("Complicação_2"),
        FixtureField::Text("Equipamento_1"),
        FixtureField::Text("Equipamento_4"),
    ]);
    std::fs::write(&path, bytes).expect("write template");
    path
}
