//! PDF text extraction with rendering-style signals.
//!
//! Content streams are walked operator by operator so that each text-showing
//! operation can be checked against the graphics state it is drawn with: an
//! effectively zero font scale or a near-white RGB fill marks the run as hidden.

use crate::error::{DetectorError, Result};
use crate::input::text_extractor::TextExtractor;
use crate::processing::document::{ExtractedDocument, HiddenReason, StyleHint};
use log::{debug, trace};
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

/// Kerning inside `TJ` larger than this (thousandths of an em) reads as a word gap
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// PDF decoder carrying its visibility thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfExtractor {
    /// Runs whose rendered horizontal scale is below this are treated as invisible
    pub min_visible_scale: f32,
    /// RGB fills with every channel above this are treated as white
    pub white_channel_threshold: f32,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self {
            min_visible_scale: 1.0,
            white_channel_threshold: 0.95,
        }
    }
}

impl TextExtractor for PdfExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        let extractor = *self;
        let bytes = bytes.to_vec();

        tokio::task::spawn_blocking(move || extractor.decode(&bytes))
            .await
            .map_err(|e| DetectorError::Extraction(format!("PDF decoding task failed: {}", e)))?
    }
}

impl PdfExtractor {
    /// Decode every page: run strings separated by spaces, one newline per page.
    pub fn decode(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        let doc = Document::load_mem(bytes).map_err(|e| match e {
            lopdf::Error::Decryption(_) => {
                DetectorError::Extraction("PDF is encrypted and cannot be read".to_string())
            }
            other => DetectorError::from(other),
        })?;

        let pages = doc.get_pages();
        debug!("Decoding PDF with {} pages", pages.len());

        let mut text = String::new();
        let mut style_hints = Vec::new();

        for (page_number, page_id) in pages {
            let runs = self.page_runs(&doc, page_id)?;
            trace!("Page {}: {} text runs", page_number, runs.len());

            for run in runs {
                if let Some(reason) = self.hidden_reason(&run) {
                    style_hints.push(StyleHint {
                        text: run.text.clone(),
                        page: page_number,
                        reason,
                    });
                }
                text.push_str(&run.text);
                text.push(' ');
            }
            text.push('\n');
        }

        debug!("PDF yielded {} style hints", style_hints.len());
        Ok(ExtractedDocument { text, style_hints })
    }

    fn hidden_reason(&self, run: &TextRun) -> Option<HiddenReason> {
        if run.horizontal_scale.abs() < self.min_visible_scale {
            return Some(HiddenReason::FontSizeZero);
        }

        match run.fill {
            FillColor::Rgb(r, g, b)
                if r > self.white_channel_threshold
                    && g > self.white_channel_threshold
                    && b > self.white_channel_threshold =>
            {
                Some(HiddenReason::WhiteText)
            }
            _ => None,
        }
    }

    fn page_runs(&self, doc: &Document, page_id: ObjectId) -> Result<Vec<TextRun>> {
        let fonts = doc.get_page_fonts(page_id)?;
        let encodings: BTreeMap<Vec<u8>, _> = fonts
            .into_iter()
            .filter_map(|(name, font)| font.get_font_encoding(doc).ok().map(|enc| (name, enc)))
            .collect();

        let content = Content::decode(&doc.get_page_content(page_id)?)?;

        let mut state = GraphicsState::default();
        let mut saved: Vec<GraphicsState> = Vec::new();
        let mut text_matrix = Matrix::IDENTITY;
        let mut line_matrix = Matrix::IDENTITY;
        let mut runs = Vec::new();

        let decode = |font: &[u8], bytes: &[u8]| -> String {
            encodings
                .get(font)
                .and_then(|enc| Document::decode_text(enc, bytes).ok())
                .unwrap_or_else(|| decode_text_simple(bytes))
        };

        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "q" => saved.push(state.clone()),
                "Q" => {
                    if let Some(previous) = saved.pop() {
                        state = previous;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        state.ctm = m.multiply(&state.ctm);
                    }
                }
                "BT" => {
                    text_matrix = Matrix::IDENTITY;
                    line_matrix = Matrix::IDENTITY;
                }
                "Tf" => {
                    if let Some(Object::Name(name)) = operands.first() {
                        state.font = name.clone();
                    }
                    if let Some(size) = operands.get(1).and_then(number) {
                        state.font_size = size;
                    }
                }
                "Tz" => {
                    if let Some(scale) = operands.first().and_then(number) {
                        state.horizontal_scaling = scale / 100.0;
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(number) {
                        state.leading = leading;
                    }
                }
                "Ts" => {
                    if let Some(rise) = operands.first().and_then(number) {
                        state.rise = rise;
                    }
                }
                "Td" | "TD" => {
                    if let (Some(tx), Some(ty)) =
                        (operands.first().and_then(number), operands.get(1).and_then(number))
                    {
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        line_matrix = Matrix::translation(tx, ty).multiply(&line_matrix);
                        text_matrix = line_matrix;
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        line_matrix = m;
                        text_matrix = m;
                    }
                }
                "T*" => {
                    line_matrix = Matrix::translation(0.0, -state.leading).multiply(&line_matrix);
                    text_matrix = line_matrix;
                }
                "rg" | "g" | "k" | "sc" | "scn" => {
                    state.fill = FillColor::from_operands(operands);
                }
                "cs" => {
                    state.fill = FillColor::initial_for_space(operands.first());
                }
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        runs.push(state.run(decode(&state.font, bytes), &text_matrix));
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = operands.first() {
                        let text = collect_tj(items, |bytes| decode(&state.font, bytes));
                        runs.push(state.run(text, &text_matrix));
                    }
                }
                "'" | "\"" => {
                    line_matrix = Matrix::translation(0.0, -state.leading).multiply(&line_matrix);
                    text_matrix = line_matrix;
                    let index = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = operands.get(index) {
                        runs.push(state.run(decode(&state.font, bytes), &text_matrix));
                    }
                }
                _ => {}
            }
        }

        Ok(runs)
    }
}

/// One text-showing operation and the state it was painted with
#[derive(Debug, Clone, PartialEq)]
struct TextRun {
    text: String,
    horizontal_scale: f32,
    fill: FillColor,
}

#[derive(Debug, Clone, PartialEq)]
enum FillColor {
    Gray(f32),
    Rgb(f32, f32, f32),
    Cmyk(f32, f32, f32, f32),
    Other,
}

impl FillColor {
    fn from_operands(operands: &[Object]) -> Self {
        let values: Vec<f32> = operands.iter().filter_map(number).collect();
        if values.len() != operands.len() {
            // Pattern colour spaces end with a name operand
            return FillColor::Other;
        }
        match values.as_slice() {
            [gray] => FillColor::Gray(*gray),
            [r, g, b] => FillColor::Rgb(*r, *g, *b),
            [c, m, y, k] => FillColor::Cmyk(*c, *m, *y, *k),
            _ => FillColor::Other,
        }
    }

    /// Selecting a fill space with `cs` resets the colour to that space's initial value
    fn initial_for_space(space: Option<&Object>) -> Self {
        match space {
            Some(Object::Name(name)) => match name.as_slice() {
                b"DeviceGray" | b"G" => FillColor::Gray(0.0),
                b"DeviceRGB" | b"RGB" => FillColor::Rgb(0.0, 0.0, 0.0),
                b"DeviceCMYK" | b"CMYK" => FillColor::Cmyk(0.0, 0.0, 0.0, 1.0),
                _ => FillColor::Other,
            },
            _ => FillColor::Other,
        }
    }
}

#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: Matrix,
    fill: FillColor,
    font: Vec<u8>,
    font_size: f32,
    horizontal_scaling: f32,
    leading: f32,
    rise: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            fill: FillColor::Gray(0.0),
            font: Vec::new(),
            font_size: 12.0,
            horizontal_scaling: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

impl GraphicsState {
    fn run(&self, text: String, text_matrix: &Matrix) -> TextRun {
        let text_space = Matrix {
            a: self.font_size * self.horizontal_scaling,
            b: 0.0,
            c: 0.0,
            d: self.font_size,
            e: 0.0,
            f: self.rise,
        };
        let rendering = text_space.multiply(text_matrix).multiply(&self.ctm);

        TextRun {
            text,
            horizontal_scale: rendering.a,
            fill: self.fill.clone(),
        }
    }
}

/// Affine transform `[a b c d e f]` in PDF's row-vector convention
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        let values: Vec<f32> = operands.iter().filter_map(number).collect();
        match values.as_slice() {
            [a, b, c, d, e, f] => Some(Matrix {
                a: *a,
                b: *b,
                c: *c,
                d: *d,
                e: *e,
                f: *f,
            }),
            _ => None,
        }
    }

    /// `self × other`
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn collect_tj(items: &[Object], mut decode: impl FnMut(&[u8]) -> String) -> String {
    let mut combined = String::new();

    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(bytes)),
            other => {
                let Some(adjustment) = number(other) else {
                    continue;
                };
                if -adjustment > TJ_SPACE_THRESHOLD {
                    if let Some(last) = combined.chars().last() {
                        if !last.is_whitespace() && !is_spaceless_script_char(last) {
                            combined.push(' ');
                        }
                    }
                }
            }
        }
    }

    combined
}

/// Scripts written without spaces between words
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x3040..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
        || (0xFF00..=0xFFEF).contains(&code)
}

/// Fallback when the font's encoding cannot be built
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}
