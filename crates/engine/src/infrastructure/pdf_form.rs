//! PDF sheet template.
//!
//! Opens the fillable character sheet, lists its AcroForm fields and writes
//! sheet values into them. Only the named-field layer is touched; page content
//! is left alone and `/NeedAppearances` asks the viewer to redraw the widgets.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use serde::Serialize;

use brancalonia_domain::{FieldValue, SheetField};

use super::ports::{ExportError, SheetExporter};

/// Kids nested deeper than this are ignored (guards against reference cycles).
const MAX_FIELD_DEPTH: usize = 32;

/// On-state used when a checkbox does not name its own.
const DEFAULT_ON_STATE: &[u8] = b"Yes";

// =============================================================================
// Field metadata
// =============================================================================

/// Kind of form field, from its `/FT` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFieldKind {
    Text,
    Button,
    Choice,
    Signature,
    Other,
}

impl FormFieldKind {
    fn from_type(field_type: Option<&[u8]>) -> Self {
        match field_type {
            Some(b"Tx") => FormFieldKind::Text,
            Some(b"Btn") => FormFieldKind::Button,
            Some(b"Ch") => FormFieldKind::Choice,
            Some(b"Sig") => FormFieldKind::Signature,
            _ => FormFieldKind::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormFieldKind::Text => "text",
            FormFieldKind::Button => "button",
            FormFieldKind::Choice => "choice",
            FormFieldKind::Signature => "signature",
            FormFieldKind::Other => "other",
        }
    }
}

/// A terminal form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormFieldInfo {
    /// Fully qualified name (`parent.child`).
    pub name: String,
    pub kind: FormFieldKind,
}

#[derive(Debug, Clone)]
struct FormField {
    info: FormFieldInfo,
    id: ObjectId,
    widgets: Vec<ObjectId>,
}

/// Outcome of a fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub written: usize,
    /// Sheet fields the template does not have.
    pub skipped: Vec<String>,
}

// =============================================================================
// Template
// =============================================================================

/// A fillable sheet template loaded in memory.
pub struct PdfFormTemplate {
    document: Document,
}

impl PdfFormTemplate {
    /// Open the template. A missing file is the "export unavailable" case.
    pub fn open(path: &Path) -> Result<Self, ExportError> {
        if !path.is_file() {
            return Err(ExportError::TemplateUnavailable(path.display().to_string()));
        }
        let document = Document::load(path)?;
        Ok(Self { document })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExportError> {
        Ok(Self {
            document: Document::load_mem(bytes)?,
        })
    }

    /// Every terminal field in the form, in document order.
    pub fn fields(&self) -> Result<Vec<FormFieldInfo>, ExportError> {
        Ok(self.collect_fields()?.into_iter().map(|f| f.info).collect())
    }

    /// Current value of a field as text; checked boxes read as `/Name`.
    pub fn field_value(&self, name: &str) -> Result<Option<String>, ExportError> {
        let fields = self.collect_fields()?;
        let Some(field) = fields.iter().find(|f| f.info.name == name) else {
            return Ok(None);
        };
        let dict = self.document.get_object(field.id)?.as_dict()?;
        let value = match dict.get(b"V") {
            Ok(Object::String(bytes, _)) => Some(decode_text(bytes)),
            Ok(Object::Name(name)) => Some(format!("/{}", String::from_utf8_lossy(name))),
            _ => None,
        };
        Ok(value)
    }

    /// Write sheet values into the form.
    pub fn fill(&mut self, fields: &[SheetField]) -> Result<FillReport, ExportError> {
        let form_fields = self.collect_fields()?;
        let by_name: HashMap<&str, &FormField> = form_fields
            .iter()
            .map(|f| (f.info.name.as_str(), f))
            .collect();

        let mut report = FillReport::default();
        for field in fields {
            let Some(target) = by_name.get(field.name.as_str()) else {
                tracing::debug!(field = %field.name, "Template has no such field, skipping");
                report.skipped.push(field.name.clone());
                continue;
            };
            match &field.value {
                FieldValue::Text(text) => {
                    self.field_dict_mut(target.id)?
                        .set("V", encode_text(text));
                }
                FieldValue::Checked => self.check(target)?,
            }
            report.written += 1;
        }

        self.acroform_mut()?
            .set("NeedAppearances", Object::Boolean(true));

        Ok(report)
    }

    pub fn to_bytes(&mut self) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        self.document.save_to(&mut buffer)?;
        Ok(buffer)
    }

    pub fn save(&mut self, path: &Path) -> Result<(), ExportError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn check(&mut self, field: &FormField) -> Result<(), ExportError> {
        let field_state = field
            .widgets
            .iter()
            .find_map(|w| on_state(&self.document, *w))
            .unwrap_or_else(|| DEFAULT_ON_STATE.to_vec());

        self.field_dict_mut(field.id)?
            .set("V", Object::Name(field_state.clone()));
        for widget in &field.widgets {
            let state = on_state(&self.document, *widget).unwrap_or_else(|| field_state.clone());
            self.field_dict_mut(*widget)?.set("AS", Object::Name(state));
        }
        Ok(())
    }

    fn field_dict_mut(&mut self, id: ObjectId) -> Result<&mut Dictionary, ExportError> {
        Ok(self.document.get_object_mut(id)?.as_dict_mut()?)
    }

    fn catalog_id(&self) -> Result<ObjectId, ExportError> {
        Ok(self.document.trailer.get(b"Root")?.as_reference()?)
    }

    fn acroform(&self) -> Result<&Dictionary, ExportError> {
        let catalog = self.document.get_object(self.catalog_id()?)?.as_dict()?;
        let acroform = catalog
            .get(b"AcroForm")
            .map_err(|_| ExportError::MissingForm)?;
        resolve_dict(&self.document, acroform).ok_or(ExportError::MissingForm)
    }

    fn acroform_mut(&mut self) -> Result<&mut Dictionary, ExportError> {
        let catalog_id = self.catalog_id()?;
        let acroform_ref = self
            .document
            .get_object(catalog_id)?
            .as_dict()?
            .get(b"AcroForm")
            .map_err(|_| ExportError::MissingForm)?
            .as_reference()
            .ok();

        match acroform_ref {
            Some(id) => self.field_dict_mut(id),
            None => Ok(self
                .field_dict_mut(catalog_id)?
                .get_mut(b"AcroForm")?
                .as_dict_mut()?),
        }
    }

    fn collect_fields(&self) -> Result<Vec<FormField>, ExportError> {
        let acroform = self.acroform()?;
        let roots: Vec<ObjectId> = match acroform.get(b"Fields") {
            Ok(fields) => fields
                .as_array()?
                .iter()
                .filter_map(|f| f.as_reference().ok())
                .collect(),
            Err(_) => Vec::new(),
        };

        let mut out = Vec::new();
        for root in roots {
            walk_field(&self.document, root, None, None, 0, &mut out);
        }
        Ok(out)
    }
}

fn walk_field(
    doc: &Document,
    id: ObjectId,
    parent_name: Option<&str>,
    inherited_type: Option<&[u8]>,
    depth: usize,
    out: &mut Vec<FormField>,
) {
    if depth > MAX_FIELD_DEPTH {
        tracing::warn!(object = ?id, "Form field tree too deep, ignoring the rest");
        return;
    }
    let Some(dict) = doc.get_object(id).ok().and_then(|o| o.as_dict().ok()) else {
        return;
    };

    let partial = dict
        .get(b"T")
        .ok()
        .and_then(|t| t.as_str().ok())
        .map(decode_text);
    let name = match (parent_name, partial) {
        (Some(parent), Some(partial)) => format!("{}.{}", parent, partial),
        (None, Some(partial)) => partial,
        (Some(parent), None) => parent.to_string(),
        (None, None) => return,
    };
    let field_type = dict
        .get(b"FT")
        .ok()
        .and_then(|ft| ft.as_name().ok())
        .or(inherited_type);

    let kids: Vec<ObjectId> = dict
        .get(b"Kids")
        .ok()
        .and_then(|k| k.as_array().ok())
        .map(|kids| kids.iter().filter_map(|k| k.as_reference().ok()).collect())
        .unwrap_or_default();

    let (child_fields, widgets): (Vec<ObjectId>, Vec<ObjectId>) =
        kids.into_iter().partition(|kid| {
            doc.get_object(*kid)
                .ok()
                .and_then(|o| o.as_dict().ok())
                .is_some_and(|d| d.has(b"T"))
        });

    if child_fields.is_empty() {
        out.push(FormField {
            info: FormFieldInfo {
                name,
                kind: FormFieldKind::from_type(field_type),
            },
            id,
            widgets: if widgets.is_empty() { vec![id] } else { widgets },
        });
        return;
    }

    for child in child_fields {
        walk_field(doc, child, Some(&name), field_type, depth + 1, out);
    }
}

fn resolve_dict<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// The widget's "on" appearance name: any `/AP /N` key other than `Off`.
fn on_state(doc: &Document, widget: ObjectId) -> Option<Vec<u8>> {
    let dict = doc.get_object(widget).ok()?.as_dict().ok()?;
    let appearance = resolve_dict(doc, dict.get(b"AP").ok()?)?;
    let normal = resolve_dict(doc, appearance.get(b"N").ok()?)?;
    normal
        .iter()
        .map(|(key, _)| key)
        .find(|key| key.as_slice() != b"Off")
        .cloned()
}

/// PDF text string: literal for ASCII, UTF-16BE with BOM otherwise.
fn encode_text(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Decode a PDF text string (UTF-16BE with BOM, else PDFDocEncoding read as Latin-1).
fn decode_text(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
        return char::decode_utf16(units)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}

// =============================================================================
// Exporter
// =============================================================================

/// [`SheetExporter`] backed by a PDF template on disk.
///
/// The template is re-read on every export so the file can be swapped
/// without restarting.
#[derive(Debug, Clone)]
pub struct PdfSheetExporter {
    template_path: PathBuf,
}

impl PdfSheetExporter {
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }
}

impl SheetExporter for PdfSheetExporter {
    fn export(&self, fields: &[SheetField]) -> Result<Vec<u8>, ExportError> {
        let mut template = PdfFormTemplate::open(&self.template_path)?;
        let report = template.fill(fields)?;
        tracing::info!(
            template = %self.template_path.display(),
            written = report.written,
            skipped = report.skipped.len(),
            "Filled sheet template"
        );
        template.to_bytes()
    }
}
