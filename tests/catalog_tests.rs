mod common;

use common::fixtures::{amendment_template, default_columns, letterhead_png, portfolio_rows};
use common::pdf_assertions::image_xobject_count;
use common::{TestResult, generate, init_logging};
use folio::{
    GenerationRequest, JsonFileTemplateStore, MergeFieldId, StoreError, Template, TemplateCatalog,
    TemplateId, TemplateStore, load_letterhead,
};

#[test]
fn fresh_store_offers_the_default_amendments() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let catalog = TemplateCatalog::new(JsonFileTemplateStore::new(dir.path().join("store.json")));

    let templates = catalog.templates()?;
    assert_eq!(templates.len(), 4);
    assert!(!dir.path().join("store.json").exists());
    Ok(())
}

#[test]
fn the_last_template_survives_deletion_attempts() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("store.json");
    let catalog = TemplateCatalog::new(JsonFileTemplateStore::new(&path));

    catalog.save(&Template::blank("a"))?;
    catalog.save(&amendment_template())?;
    catalog.delete(&TemplateId::from("a"))?;

    let last = TemplateId::from("amendment");
    assert_eq!(catalog.delete(&last), Err(StoreError::LastTemplate(last.clone())));

    let reopened = TemplateCatalog::new(JsonFileTemplateStore::new(&path));
    let templates = reopened.templates()?;
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0], amendment_template());
    Ok(())
}

#[test]
fn merge_fields_are_scoped_per_template() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let catalog = TemplateCatalog::new(JsonFileTemplateStore::new(dir.path().join("store.json")));
    let client = catalog.add_merge_field("m1", "Client Name")?;
    catalog.add_merge_field("m2", "Effective Date")?;
    assert_eq!(client.key, "{{ClientName}}");

    let mut template = amendment_template();
    template.toggle_merge_field(&MergeFieldId::from("m1"));
    catalog.save(&template)?;

    let stored = catalog.template(&template.id)?;
    let keys: Vec<String> = catalog
        .merge_fields_for(&stored)?
        .into_iter()
        .map(|f| f.key)
        .collect();
    assert_eq!(keys, vec!["{{ClientName}}".to_string()]);

    catalog.store().delete_merge_field(&MergeFieldId::from("m2"))?;
    assert_eq!(catalog.store().fetch_merge_fields()?.len(), 1);
    Ok(())
}

#[test]
fn stored_letterhead_reference_feeds_generation() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("letterhead.png"), letterhead_png())?;

    let catalog = TemplateCatalog::new(JsonFileTemplateStore::new(dir.path().join("store.json")));
    catalog.set_letterhead_reference("letterhead.png")?;

    let reference = catalog.letterhead_reference()?.ok_or("no letterhead stored")?;
    let letterhead = load_letterhead(&reference, dir.path())?;

    let rows = portfolio_rows();
    let columns = default_columns(&rows);
    let template = catalog.template(&TemplateId::from("1"))?;
    let pdf = generate(&GenerationRequest::new(template, rows, columns).with_letterhead(letterhead))?;
    assert_eq!(image_xobject_count(&pdf.doc), 1);
    Ok(())
}

#[test]
fn letterhead_references_cannot_escape_their_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    assert!(load_letterhead("../letterhead.png", dir.path()).is_err());
    Ok(())
}
