use crate::config::GeneratorConfig;
use crate::error::PipelineError;
use folio_layout::{DocumentContent, LayoutConfig, LayoutEngine, TableContent};
use folio_merge::{MergeValues, resolve_merge_fields, try_resolve_merge_fields};
use folio_portfolio::{ColumnSchema, summarize, visible_columns};
use folio_render_lopdf::LopdfRenderer;
use folio_traits::SharedResourceData;
use folio_types::{ColumnConfig, HighlightedRows, MergeFieldValues, Row, Template};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Characters that cannot appear in the generated file name.
const FORBIDDEN_FILE_NAME_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Everything one generation needs. Each request is an independent
/// snapshot; nothing is shared between requests.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub template: Template,
    pub rows: Vec<Row>,
    pub columns: Vec<ColumnConfig>,
    pub highlighted: HighlightedRows,
    pub letterhead: Option<SharedResourceData>,
    pub merge_values: MergeFieldValues,
}

impl GenerationRequest {
    pub fn new(template: Template, rows: Vec<Row>, columns: Vec<ColumnConfig>) -> Self {
        Self {
            template,
            rows,
            columns,
            highlighted: HighlightedRows::default(),
            letterhead: None,
            merge_values: MergeFieldValues::new(),
        }
    }

    pub fn with_highlighted(mut self, highlighted: HighlightedRows) -> Self {
        self.highlighted = highlighted;
        self
    }

    pub fn with_letterhead(mut self, letterhead: SharedResourceData) -> Self {
        self.letterhead = Some(letterhead);
        self
    }

    pub fn with_merge_values(mut self, merge_values: MergeFieldValues) -> Self {
        self.merge_values = merge_values;
        self
    }
}

/// A finished PDF, fully serialized.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Turns generation requests into PDFs. Holds only immutable configuration;
/// every call builds its own layout and render state.
#[derive(Debug, Clone)]
pub struct DocumentGenerator {
    engine: LayoutEngine,
    schema: ColumnSchema,
    strict_merge: bool,
    renderer: LopdfRenderer,
}

#[derive(Debug, Default)]
pub struct DocumentGeneratorBuilder {
    config: GeneratorConfig,
    compress: Option<bool>,
}

impl DocumentGeneratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn with_schema(mut self, schema: ColumnSchema) -> Self {
        self.config.schema = schema;
        self
    }

    pub fn strict_merge(mut self, strict: bool) -> Self {
        self.config.strict_merge = strict;
        self
    }

    /// Content streams are compressed unless turned off here.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = Some(compress);
        self
    }

    pub fn build(self) -> Result<DocumentGenerator, PipelineError> {
        let engine = LayoutEngine::new(self.config.layout)?;
        let renderer = LopdfRenderer::new().with_compression(self.compress.unwrap_or(true));
        Ok(DocumentGenerator {
            engine,
            schema: self.config.schema,
            strict_merge: self.config.strict_merge,
            renderer,
        })
    }
}

impl DocumentGenerator {
    pub fn builder() -> DocumentGeneratorBuilder {
        DocumentGeneratorBuilder::new()
    }

    pub fn new(config: GeneratorConfig) -> Result<Self, PipelineError> {
        Self::builder().with_config(config).build()
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Aggregates, merges, lays out and renders one document.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GeneratedDocument, PipelineError> {
        if request.rows.is_empty() {
            return Err(PipelineError::EmptyRows);
        }
        for key in request.merge_values.invalid_keys() {
            log::warn!("Merge value key '{key}' is not a placeholder and will never match");
        }
        log::info!(
            "Generating document from template '{}': {} rows, {} visible columns",
            request.template.id,
            request.rows.len(),
            visible_columns(&request.columns).len()
        );

        let summary = summarize(&request.rows, &self.schema);
        let template = &request.template;
        let content = DocumentContent {
            title: self.resolve(&template.title, &request.merge_values)?,
            body: self.resolve(&template.body, &request.merge_values)?,
            table: TableContent::build(
                &request.rows,
                &request.columns,
                &request.highlighted,
                &summary,
                &self.schema,
            ),
            signature_left: self.resolve(&template.signature_left, &request.merge_values)?,
            signature_right: self.resolve(&template.signature_right, &request.merge_values)?,
            letterhead: request.letterhead.clone(),
        };

        let laid_out = self.engine.layout(&content)?;
        let bytes = self.renderer.render(&laid_out, &content.title)?;
        let page_count = laid_out.page_count();
        log::debug!("Rendered {} pages, {} bytes", page_count, bytes.len());

        Ok(GeneratedDocument {
            file_name: sanitize_file_name(&content.title),
            bytes,
            page_count,
        })
    }

    /// Generates and writes the PDF into `dir` under its derived file name.
    /// The bytes go to a temporary sibling first, so a failed write never
    /// leaves a partial file behind.
    pub fn generate_to_dir<P: AsRef<Path>>(
        &self,
        request: &GenerationRequest,
        dir: P,
    ) -> Result<PathBuf, PipelineError> {
        let dir = dir.as_ref();
        let document = self.generate(request)?;
        std::fs::create_dir_all(dir)?;

        let target = dir.join(&document.file_name);
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&document.bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| PipelineError::Io(e.error))?;

        log::info!(
            "Wrote {} ({} pages) to {}",
            document.file_name,
            document.page_count,
            target.display()
        );
        Ok(target)
    }

    fn resolve(&self, text: &str, values: &MergeFieldValues) -> Result<String, PipelineError> {
        if self.strict_merge {
            Ok(try_resolve_merge_fields(text, values)?)
        } else {
            Ok(resolve_merge_fields(text, values))
        }
    }
}

/// Generates with the default configuration.
pub fn generate_document(
    template: &Template,
    rows: &[Row],
    columns: &[ColumnConfig],
    highlighted: &HighlightedRows,
    letterhead: Option<SharedResourceData>,
    merge_values: &MergeFieldValues,
) -> Result<GeneratedDocument, PipelineError> {
    let request = GenerationRequest {
        template: template.clone(),
        rows: rows.to_vec(),
        columns: columns.to_vec(),
        highlighted: highlighted.clone(),
        letterhead,
        merge_values: merge_values.clone(),
    };
    DocumentGenerator::new(GeneratorConfig::default())?.generate(&request)
}

/// File name for a document title: path and shell metacharacters become
/// `_` and `.pdf` is appended.
pub fn sanitize_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if FORBIDDEN_FILE_NAME_CHARS.contains(&c) { '_' } else { c })
        .collect();
    format!("{stem}.pdf")
}

/// Resolves a letterhead reference (a data URL or a path relative to
/// `base_dir`) to image bytes.
pub fn load_letterhead(
    reference: &str,
    base_dir: impl AsRef<Path>,
) -> Result<SharedResourceData, PipelineError> {
    let provider = folio_resource::provider_for(reference, base_dir);
    let data = provider.load(reference)?;
    log::debug!(
        "Loaded letterhead ({} bytes) through {}",
        data.len(),
        provider.name()
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::CellValue;

    fn rows() -> Vec<Row> {
        vec![
            [
                ("Loan Account".to_string(), CellValue::text("ML-1")),
                ("Loan Balance".to_string(), CellValue::Number(100.0)),
            ]
            .into_iter()
            .collect(),
        ]
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn generator_is_shareable() {
        assert_send_sync::<DocumentGenerator>();
    }

    #[test]
    fn file_names_replace_forbidden_characters() {
        assert_eq!(sanitize_file_name("Amendment: 1/2"), "Amendment_ 1_2.pdf");
        assert_eq!(sanitize_file_name(r#"a\b?c%d*e|f"g<h>"#), "a_b_c_d_e_f_g_h_.pdf");
        assert_eq!(sanitize_file_name("Plain"), "Plain.pdf");
    }

    #[test]
    fn empty_rows_are_rejected() {
        let generator = DocumentGenerator::new(GeneratorConfig::default()).unwrap();
        let request = GenerationRequest::new(Template::blank("t"), vec![], vec![]);
        assert!(matches!(generator.generate(&request), Err(PipelineError::EmptyRows)));
    }

    #[test]
    fn invalid_layout_fails_at_build() {
        let layout = LayoutConfig {
            margin_mm: 200.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            DocumentGenerator::builder().with_layout(layout).build(),
            Err(PipelineError::Layout(_))
        ));
    }

    #[test]
    fn strict_merge_reports_malformed_placeholders() {
        let mut template = Template::blank("t");
        template.title = "Amendment {{Open".to_string();
        let request = GenerationRequest::new(template, rows(), vec![]);

        let lenient = DocumentGenerator::new(GeneratorConfig::default()).unwrap();
        let document = lenient.generate(&request).unwrap();
        assert_eq!(document.file_name, "Amendment {{Open.pdf");

        let strict = DocumentGenerator::builder().strict_merge(true).build().unwrap();
        assert!(matches!(strict.generate(&request), Err(PipelineError::Merge(_))));
    }

    #[test]
    fn title_placeholders_reach_the_file_name() {
        let mut template = Template::blank("t");
        template.title = "Amendment {{Number}}".to_string();
        let values: MergeFieldValues =
            [("{{Number}}".to_string(), "3/4".to_string())].into_iter().collect();

        let document = generate_document(
            &template,
            &rows(),
            &[],
            &HighlightedRows::default(),
            None,
            &values,
        )
        .unwrap();
        assert_eq!(document.file_name, "Amendment 3_4.pdf");
        assert_eq!(document.page_count, 1);
        assert!(document.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn unreadable_letterhead_is_a_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_letterhead("missing.png", dir.path()),
            Err(PipelineError::Resource(_))
        ));
    }
}
