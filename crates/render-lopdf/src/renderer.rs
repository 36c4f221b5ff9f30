use crate::RenderError;
use crate::helpers::{deflate, font_resource_name, to_text_string, to_win_ansi};
use crate::xobject::image_xobject;
use folio_layout::{FontFace, ImageElement, LaidOutDocument, LayoutElement, PositionedElement, TextElement};
use folio_types::Color;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::HashMap;

/// Baseline offset below the top of a text element, as a fraction of its
/// font size. Must agree with the layout engine.
const BASELINE_RATIO: f32 = 0.8;
const PRODUCER: &str = "folio";

/// Renders laid-out documents to PDF bytes.
///
/// Text uses the base-14 Helvetica faces with WinAnsiEncoding, so nothing
/// is embedded apart from image resources.
#[derive(Debug, Clone)]
pub struct LopdfRenderer {
    compress: bool,
}

impl Default for LopdfRenderer {
    fn default() -> Self {
        Self { compress: true }
    }
}

impl LopdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave page content streams uncompressed, handy when reading the
    /// output by eye.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Serializes `document` into a complete PDF file. `title` goes into the
    /// document information dictionary.
    pub fn render(&self, document: &LaidOutDocument, title: &str) -> Result<Vec<u8>, RenderError> {
        let mut writer = PdfWriter::begin(document, self.compress)?;
        for page in &document.pages {
            writer.render_page(page)?;
        }
        let bytes = writer.finish(title)?;
        log::debug!(
            "Rendered {} page(s) into {} bytes",
            document.page_count(),
            bytes.len()
        );
        Ok(bytes)
    }
}

/// Object graph of one PDF under construction.
struct PdfWriter {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    xobjects: HashMap<String, String>,
    page_width: f32,
    page_height: f32,
    compress: bool,
}

impl PdfWriter {
    fn begin(laid_out: &LaidOutDocument, compress: bool) -> Result<Self, RenderError> {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for face in [FontFace::Regular, FontFace::Bold] {
            let font = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            };
            fonts.set(font_resource_name(face), document.add_object(font));
        }

        let mut entries: Vec<_> = laid_out.resources.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let mut xobjects = HashMap::new();
        let mut xobject_dict = Dictionary::new();
        for (index, (resource, data)) in entries.into_iter().enumerate() {
            let name = format!("Im{}", index + 1);
            let stream = image_xobject(resource, data.as_slice())?;
            xobject_dict.set(name.as_str(), document.add_object(stream));
            xobjects.insert(resource.clone(), name);
        }

        let mut resources = dictionary! { "Font" => fonts };
        if !xobjects.is_empty() {
            resources.set("XObject", xobject_dict);
        }
        let resources_id = document.add_object(resources);

        Ok(Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            xobjects,
            page_width: laid_out.page_width,
            page_height: laid_out.page_height,
            compress,
        })
    }

    fn render_page(&mut self, elements: &[PositionedElement]) -> Result<(), RenderError> {
        let mut page = PageContext::new(self.page_height, &self.xobjects);
        for element in elements {
            page.draw_element(element)?;
        }
        let content = page.finish().encode()?;

        let stream = if self.compress {
            Stream::new(dictionary! { "Filter" => "FlateDecode" }, deflate(&content)?)
        } else {
            Stream::new(Dictionary::new(), content)
        };
        let content_id = self.document.add_object(stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.page_width.into(), self.page_height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    fn finish(mut self, title: &str) -> Result<Vec<u8>, RenderError> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self
            .document
            .add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.document.trailer.set("Root", catalog_id);

        let info_id = self.document.add_object(dictionary! {
            "Title" => Object::String(to_text_string(title), StringFormat::Hexadecimal),
            "Producer" => Object::string_literal(PRODUCER),
        });
        self.document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Graphics state already emitted on the page, so repeated runs with the
/// same font or color do not repeat the operators.
#[derive(Debug, Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(FontFace, f32)>,
    fill_color: Option<Color>,
    word_spacing: f32,
}

struct PageContext<'a> {
    page_height: f32,
    content: Content,
    state: PageRenderState,
    xobjects: &'a HashMap<String, String>,
}

impl<'a> PageContext<'a> {
    fn new(page_height: f32, xobjects: &'a HashMap<String, String>) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
            xobjects,
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_element(&mut self, el: &PositionedElement) -> Result<(), RenderError> {
        match &el.element {
            LayoutElement::Rect(rect) => self.draw_rect(rect.fill, el),
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Image(image) => self.draw_image(image, el)?,
        }
        Ok(())
    }

    fn draw_rect(&mut self, fill: Color, el: &PositionedElement) {
        self.set_fill_color(fill);
        let y = self.page_height - (el.y + el.height);
        self.op("re", vec![el.x.into(), y.into(), el.width.into(), el.height.into()]);
        self.op("f", vec![]);
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some((face, size)) {
            self.op(
                "Tf",
                vec![Object::Name(font_resource_name(face).as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some((face, size));
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.op("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_word_spacing(&mut self, spacing: f32) {
        if self.state.word_spacing != spacing {
            self.op("Tw", vec![spacing.into()]);
            self.state.word_spacing = spacing;
        }
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.content.trim().is_empty() {
            return;
        }
        self.op("BT", vec![]);
        self.set_font(text.font, text.font_size);
        self.set_fill_color(text.color);
        self.set_word_spacing(text.word_spacing);
        let baseline = self.page_height - (el.y + text.font_size * BASELINE_RATIO);
        self.op("Td", vec![el.x.into(), baseline.into()]);
        self.op(
            "Tj",
            vec![Object::String(to_win_ansi(&text.content), StringFormat::Literal)],
        );
        self.op("ET", vec![]);
    }

    fn draw_image(&mut self, image: &ImageElement, el: &PositionedElement) -> Result<(), RenderError> {
        let name = self
            .xobjects
            .get(&image.resource)
            .ok_or_else(|| RenderError::MissingResource(image.resource.clone()))?
            .clone();
        let y = self.page_height - (el.y + el.height);
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![el.width.into(), 0.into(), 0.into(), el.height.into(), el.x.into(), y.into()],
        );
        self.op("Do", vec![Object::Name(name.into_bytes())]);
        self.op("Q", vec![]);
        Ok(())
    }
}
