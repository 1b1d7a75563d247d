// variant-editor/tests/collaborators.rs
// Editor actions that cross a collaborator boundary, using in-memory fakes

use async_trait::async_trait;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Attribute, AttributeCreate, AttributeKind, AttributeSet, AttributeSetCreate,
    AttributeSetCreated, ImageBlob, ImageRef, ProductCreate, ProductCreated,
};
use std::sync::Mutex;
use variant_editor::{
    AttributeDraft, AttributeSetDraft, AttributeSource, CatalogWriter, EditorError,
    ImageUploadSink, ProductEditor, SubmissionSink, VariantKey,
};

fn sets() -> Vec<AttributeSet> {
    vec![AttributeSet {
        id: "shirt".into(),
        name: "Shirt".into(),
        attributes: vec![
            Attribute {
                id: "color".into(),
                label: "Color".into(),
                kind: AttributeKind::Options,
                options: vec!["Red".into(), "Blue".into()],
            },
            Attribute {
                id: "material".into(),
                label: "Material".into(),
                kind: AttributeKind::String,
                options: Vec::new(),
            },
        ],
    }]
}

struct FakeCatalog {
    fail: bool,
}

#[async_trait]
impl AttributeSource for FakeCatalog {
    async fn attribute_sets(&self) -> AppResult<Vec<AttributeSet>> {
        if self.fail {
            return Err(AppError::network("connection refused"));
        }
        Ok(sets())
    }

    async fn attributes(&self) -> AppResult<Vec<Attribute>> {
        if self.fail {
            return Err(AppError::network("connection refused"));
        }
        Ok(sets().remove(0).attributes)
    }
}

#[derive(Default)]
struct FakeUploads {
    fail: bool,
    /// References added to every reply on top of one per blob
    extra_refs: usize,
    calls: Mutex<Vec<usize>>,
}

#[async_trait]
impl ImageUploadSink for FakeUploads {
    async fn upload_images(&self, images: &[ImageBlob]) -> AppResult<Vec<ImageRef>> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(images.len());
        if self.fail {
            return Err(AppError::with_message(ErrorCode::UploadFailed, "disk full"));
        }
        let batch = calls.len();
        let mut refs: Vec<_> = images
            .iter()
            .map(|img| ImageRef::new(format!("uploads/{batch}/{}", img.file_name)))
            .collect();
        refs.extend(
            (0..self.extra_refs).map(|i| ImageRef::new(format!("uploads/{batch}/extra-{i}"))),
        );
        Ok(refs)
    }
}

#[derive(Default)]
struct FakeProducts {
    fail: bool,
    received: Mutex<Vec<(ProductCreate, String)>>,
}

#[async_trait]
impl SubmissionSink for FakeProducts {
    async fn submit_product(
        &self,
        product: &ProductCreate,
        idempotency_key: &str,
    ) -> AppResult<ProductCreated> {
        self.received
            .lock()
            .unwrap()
            .push((product.clone(), idempotency_key.to_string()));
        if self.fail {
            return Err(AppError::network("timeout"));
        }
        Ok(ProductCreated {
            id: Some("p-1".into()),
            name: product.name.clone(),
            variants: product.variants.clone(),
        })
    }
}

#[derive(Default)]
struct FakeWriter {
    fail: bool,
}

#[async_trait]
impl CatalogWriter for FakeWriter {
    async fn create_attribute(&self, attribute: &AttributeCreate) -> AppResult<Attribute> {
        if self.fail {
            return Err(AppError::network("offline"));
        }
        Ok(Attribute {
            id: "new-attr".into(),
            label: attribute.label.clone(),
            kind: attribute.kind,
            options: attribute.options.clone().unwrap_or_default(),
        })
    }

    async fn create_attribute_set(
        &self,
        attribute_set: &AttributeSetCreate,
    ) -> AppResult<AttributeSetCreated> {
        if self.fail {
            return Err(AppError::network("offline"));
        }
        Ok(AttributeSetCreated {
            id: Some("new-set".into()),
            name: attribute_set.name.clone(),
        })
    }
}

fn png(name: &str) -> ImageBlob {
    ImageBlob::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

async fn loaded_editor() -> ProductEditor {
    let mut editor = ProductEditor::new();
    editor
        .load_attribute_sets(&FakeCatalog { fail: false })
        .await
        .unwrap();
    editor.choose_attribute_set("shirt").unwrap();
    editor.select_options("color", ["Red", "Blue"]).unwrap();
    editor
}

#[tokio::test]
async fn test_load_failure_keeps_previous_sets() {
    let mut editor = ProductEditor::new();
    editor
        .load_attribute_sets(&FakeCatalog { fail: false })
        .await
        .unwrap();
    assert_eq!(editor.attribute_sets().len(), 1);

    let err = editor
        .load_attribute_sets(&FakeCatalog { fail: true })
        .await
        .unwrap_err();
    assert!(!err.is_validation());
    assert_eq!(editor.attribute_sets().len(), 1);
}

#[tokio::test]
async fn test_images_follow_variant_identity() {
    let mut editor = loaded_editor().await;
    let uploads = FakeUploads::default();
    let blue = VariantKey::new([("color", "Blue")]);

    let images = editor
        .upload_images(&blue, vec![png("front.png"), png("back.png")], &uploads)
        .await
        .unwrap();
    assert_eq!(images.len(), 2);

    // Reorder the selection: Blue now comes first, its images stay with it
    editor.toggle_option("color", "Red").unwrap();
    editor.toggle_option("color", "Red").unwrap();
    assert_eq!(
        editor.variants()[0].combination.entries()[0].value,
        "Blue"
    );
    assert_eq!(
        editor.variants()[0].images,
        vec![
            ImageRef::new("uploads/1/front.png"),
            ImageRef::new("uploads/1/back.png"),
        ]
    );
    assert!(editor.variants()[1].images.is_empty());
}

#[tokio::test]
async fn test_image_cap_is_checked_before_upload() {
    let mut editor = loaded_editor().await;
    let uploads = FakeUploads::default();
    let red = VariantKey::new([("color", "Red")]);

    let six: Vec<_> = (0..6).map(|i| png(&format!("{i}.png"))).collect();
    let err = editor.upload_images(&red, six, &uploads).await.unwrap_err();
    assert!(matches!(err, EditorError::TooManyImages { incoming: 6, .. }));

    let four: Vec<_> = (0..4).map(|i| png(&format!("{i}.png"))).collect();
    editor.upload_images(&red, four, &uploads).await.unwrap();
    let two = vec![png("a.png"), png("b.png")];
    let err = editor.upload_images(&red, two, &uploads).await.unwrap_err();
    assert!(matches!(err, EditorError::TooManyImages { existing: 4, .. }));

    assert_eq!(*uploads.calls.lock().unwrap(), vec![4]);
    assert_eq!(editor.variant(&red).unwrap().images.len(), 4);
}

#[tokio::test]
async fn test_failed_upload_leaves_images_untouched() {
    let mut editor = loaded_editor().await;
    let red = VariantKey::new([("color", "Red")]);
    editor
        .upload_images(&red, vec![png("ok.png")], &FakeUploads::default())
        .await
        .unwrap();

    let failing = FakeUploads {
        fail: true,
        ..Default::default()
    };
    let err = editor
        .upload_images(&red, vec![png("broken.png")], &failing)
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::Transport(ref e) if e.code == ErrorCode::UploadFailed));
    assert_eq!(
        editor.variant(&red).unwrap().images,
        vec![ImageRef::new("uploads/1/ok.png")]
    );
}

#[tokio::test]
async fn test_upload_reply_must_match_batch() {
    let mut editor = loaded_editor().await;
    let red = VariantKey::new([("color", "Red")]);
    let greedy = FakeUploads {
        extra_refs: 3,
        ..Default::default()
    };

    let err = editor
        .upload_images(&red, vec![png("a.png"), png("b.png")], &greedy)
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::Transport(ref e) if e.code == ErrorCode::UploadFailed));
    let err = editor
        .upload_images(&red, vec![png("c.png")], &greedy)
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::Transport(_)));
    assert!(editor.variant(&red).unwrap().images.is_empty());

    let short = FakeUploads::default();
    editor
        .upload_images(&red, vec![png("ok.png")], &short)
        .await
        .unwrap();
    assert_eq!(editor.variant(&red).unwrap().images.len(), 1);
}

#[tokio::test]
async fn test_upload_to_unknown_variant_is_rejected() {
    let mut editor = loaded_editor().await;
    let uploads = FakeUploads::default();
    let green = VariantKey::new([("color", "Green")]);
    let err = editor
        .upload_images(&green, vec![png("g.png")], &uploads)
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::UnknownVariant(_)));
    assert!(uploads.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_success_resets_and_rotates_key() {
    let mut editor = loaded_editor().await;
    editor.set_name("Shirt");
    editor.set_sku("SHIRT");
    editor.set_scalar("material", "Cotton").unwrap();
    editor
        .set_price(&VariantKey::new([("color", "Blue")]), 19.9)
        .unwrap();
    let key_before = editor.idempotency_key().to_string();

    let sink = FakeProducts::default();
    let ack = editor.submit(&sink).await.unwrap();
    assert_eq!(ack.name, "Shirt");

    let received = sink.received.lock().unwrap();
    let (product, key) = &received[0];
    assert_eq!(key, &key_before);
    assert_eq!(product.attribute_set_id, "shirt");
    assert_eq!(product.variants.len(), 2);
    assert_eq!(product.variants[1].sku, "SHIRT-2");
    assert_eq!(product.variants[1].price, 19.9);

    assert!(editor.name().is_empty());
    assert!(editor.sku().is_empty());
    assert!(editor.attribute_set().is_none());
    assert!(editor.variants().is_empty());
    assert_ne!(editor.idempotency_key(), key_before);
    assert_eq!(editor.attribute_sets().len(), 1);
}

#[tokio::test]
async fn test_submit_failure_keeps_draft_and_key() {
    let mut editor = loaded_editor().await;
    editor.set_name("Shirt");
    editor.set_sku("SHIRT");
    let key_before = editor.idempotency_key().to_string();

    let failing = FakeProducts {
        fail: true,
        ..Default::default()
    };
    let err = editor.submit(&failing).await.unwrap_err();
    assert!(!err.is_validation());
    assert_eq!(editor.variants().len(), 2);
    assert_eq!(editor.name(), "Shirt");
    assert_eq!(editor.idempotency_key(), key_before);

    // A retry carries the same key
    let sink = FakeProducts::default();
    editor.submit(&sink).await.unwrap();
    assert_eq!(sink.received.lock().unwrap()[0].1, key_before);
}

#[tokio::test]
async fn test_edit_after_failure_draws_new_key() {
    let mut editor = loaded_editor().await;
    editor.set_name("Shirt");
    editor.set_sku("SHIRT");
    let red = VariantKey::new([("color", "Red")]);
    editor.set_price(&red, 10.0).unwrap();

    let failing = FakeProducts {
        fail: true,
        ..Default::default()
    };
    editor.submit(&failing).await.unwrap_err();
    editor.set_price(&red, 99.0).unwrap();
    editor.submit(&failing).await.unwrap_err();
    // Unchanged since the second attempt
    editor.submit(&failing).await.unwrap_err();

    let attempts: Vec<(f64, String)> = failing
        .received
        .lock()
        .unwrap()
        .iter()
        .map(|(product, key)| (product.variants[0].price, key.clone()))
        .collect();
    assert_eq!(attempts[0].0, 10.0);
    assert_eq!(attempts[1].0, 99.0);
    assert_ne!(attempts[0].1, attempts[1].1);
    assert_eq!(attempts[1].1, attempts[2].1);
    assert_eq!(editor.idempotency_key(), attempts[2].1);

    let sink = FakeProducts::default();
    editor.submit(&sink).await.unwrap();
    assert_eq!(sink.received.lock().unwrap()[0].1, attempts[2].1);
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_sink() {
    let mut editor = loaded_editor().await;
    editor.set_sku("SHIRT");
    let sink = FakeProducts::default();

    let err = editor.submit(&sink).await.unwrap_err();
    assert!(matches!(err, EditorError::Required("Product name")));
    assert!(sink.received.lock().unwrap().is_empty());

    // Second submit after success has nothing left to send
    editor.set_name("Shirt");
    editor.submit(&sink).await.unwrap();
    assert!(editor.submit(&sink).await.is_err());
    assert_eq!(sink.received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_attribute_authoring_round() {
    let mut draft = AttributeDraft::new("Size", AttributeKind::Options);
    draft.set_option(0, "S");
    draft.add_option();
    draft.set_option(1, " ");
    draft.add_option();
    draft.set_option(2, "M");

    let failed = draft.submit(&FakeWriter { fail: true }).await;
    assert!(failed.is_err());
    assert_eq!(draft.label, "Size");

    let created = draft.submit(&FakeWriter::default()).await.unwrap();
    assert_eq!(created.options, vec!["S".to_string(), "M".to_string()]);
    assert_eq!(draft, AttributeDraft::default());

    let mut set = AttributeSetDraft::new("Gold");
    set.toggle(&created.id);
    let ack = set.submit(&FakeWriter::default()).await.unwrap();
    assert_eq!(ack.name, "Gold");
    assert!(set.attribute_ids().is_empty());
}

#[tokio::test]
async fn test_set_draft_checks_picked_attributes() {
    let mut set = AttributeSetDraft::new("Shirt basics");
    assert!(set.available().is_empty());
    assert!(
        set.load_attributes(&FakeCatalog { fail: true })
            .await
            .is_err()
    );

    let loaded = set
        .load_attributes(&FakeCatalog { fail: false })
        .await
        .unwrap();
    assert_eq!(loaded.len(), 2);

    set.toggle("color");
    set.toggle("retired");
    assert!(matches!(
        set.to_payload(),
        Err(EditorError::UnknownAttribute(ref id)) if id == "retired"
    ));

    set.toggle("retired");
    let ack = set.submit(&FakeWriter::default()).await.unwrap();
    assert_eq!(ack.name, "Shirt basics");
    assert!(set.attribute_ids().is_empty());
    assert_eq!(set.available().len(), 2);

    // Failed reload keeps the list
    assert!(
        set.load_attributes(&FakeCatalog { fail: true })
            .await
            .is_err()
    );
    assert_eq!(set.available().len(), 2);
}
