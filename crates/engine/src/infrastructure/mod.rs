//! Infrastructure - reference data files, build files and the PDF sheet.

pub mod build_file;
pub mod pdf_form;
pub mod ports;
pub mod reference_loader;
