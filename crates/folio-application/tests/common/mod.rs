//! Fakes shared by the integration tests.
//!
//! Every gateway call is appended to one [`CallLog`] so tests can assert on
//! the order of side effects across the repository and object storage.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use folio_core::auth::{AuthSession, UserClaims};
use folio_core::clock::{Clock, FixedClock};
use folio_core::error::{FolioError, Result};
use folio_core::image::{GalleryFields, StagedFile};
use folio_core::repository::Repository;
use folio_core::storage::{ObjectStorage, ProgressCallback};
use folio_core::store::{Document, DocumentStore, Query};
use folio_infrastructure::{CollectionRepository, InMemoryDocumentStore, StaticAuthProvider};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { images: Vec<String> },
    Update { id: String, images: Vec<String> },
    Delete { id: String },
    Upload { path: String, reference: String },
    DeleteObject { reference: String },
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn uploads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Upload { reference, .. } => Some(reference),
                _ => None,
            })
            .collect()
    }

    pub fn object_deletes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::DeleteObject { reference } => Some(reference),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Update { .. }))
            .count()
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::on(today()))
}

pub fn memory_store() -> Arc<dyn DocumentStore> {
    Arc::new(InMemoryDocumentStore::with_clock(clock()))
}

pub fn admin_auth() -> Arc<StaticAuthProvider> {
    Arc::new(StaticAuthProvider::new(Some(AuthSession {
        uid: "admin-1".to_string(),
        email: Some("admin@example.com".to_string()),
        claims: UserClaims { admin: true },
    })))
}

pub fn visitor_auth() -> Arc<StaticAuthProvider> {
    Arc::new(StaticAuthProvider::new(Some(AuthSession {
        uid: "visitor-1".to_string(),
        email: None,
        claims: UserClaims::default(),
    })))
}

pub fn png(name: &str) -> StagedFile {
    StagedFile::new(name, "image/png", vec![7; 16])
}

/// Repository wrapper that records calls and fails on request.
pub struct RecordingRepository<T: Document> {
    inner: CollectionRepository<T>,
    log: CallLog,
    images_of: fn(&T::Fields) -> Vec<String>,
    fail_create: Mutex<bool>,
    fail_update: Mutex<bool>,
    fail_reads: Mutex<bool>,
}

fn gallery_images<F: GalleryFields>(fields: &F) -> Vec<String> {
    fields.images().to_vec()
}

fn no_images<F>(_: &F) -> Vec<String> {
    Vec::new()
}

impl<T: Document> RecordingRepository<T> {
    fn with_images_of(
        store: Arc<dyn DocumentStore>,
        log: CallLog,
        images_of: fn(&T::Fields) -> Vec<String>,
    ) -> Self {
        Self {
            inner: CollectionRepository::new(store),
            log,
            images_of,
            fail_create: Mutex::new(false),
            fail_update: Mutex::new(false),
            fail_reads: Mutex::new(false),
        }
    }

    /// Records image lists of create/update calls.
    pub fn gallery(store: Arc<dyn DocumentStore>, log: CallLog) -> Self
    where
        T::Fields: GalleryFields,
    {
        Self::with_images_of(store, log, gallery_images::<T::Fields>)
    }

    pub fn plain(store: Arc<dyn DocumentStore>, log: CallLog) -> Self {
        Self::with_images_of(store, log, no_images::<T::Fields>)
    }

    pub fn fail_create(&self, fail: bool) {
        *self.fail_create.lock().unwrap() = fail;
    }

    pub fn fail_update(&self, fail: bool) {
        *self.fail_update.lock().unwrap() = fail;
    }

    pub fn fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    fn check_reads(&self) -> Result<()> {
        if *self.fail_reads.lock().unwrap() {
            return Err(FolioError::data_access("injected read failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Document> Repository<T> for RecordingRepository<T> {
    async fn list(&self, query: Query) -> Result<Vec<T>> {
        self.check_reads()?;
        self.inner.list(query).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        self.check_reads()?;
        self.inner.find_by_id(id).await
    }

    async fn create(&self, fields: &T::Fields) -> Result<T> {
        self.log.push(Call::Create {
            images: (self.images_of)(fields),
        });
        if *self.fail_create.lock().unwrap() {
            return Err(FolioError::data_access("injected create failure"));
        }
        self.inner.create(fields).await
    }

    async fn create_with_id(&self, id: &str, fields: &T::Fields) -> Result<T> {
        self.inner.create_with_id(id, fields).await
    }

    async fn update(&self, id: &str, fields: &T::Fields) -> Result<T> {
        self.log.push(Call::Update {
            id: id.to_string(),
            images: (self.images_of)(fields),
        });
        if *self.fail_update.lock().unwrap() {
            return Err(FolioError::data_access("injected update failure"));
        }
        self.inner.update(id, fields).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.log.push(Call::Delete { id: id.to_string() });
        self.inner.delete(id).await
    }

    async fn increment(&self, id: &str, field: &str, delta: i64) -> Result<()> {
        self.inner.increment(id, field, delta).await
    }
}

/// In-memory object storage that records calls and fails on request.
#[derive(Default)]
pub struct FakeStorage {
    log: CallLog,
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    failing_uploads: Mutex<HashSet<String>>,
    failing_deletes: Mutex<HashSet<String>>,
    on_upload: Mutex<Option<Box<dyn Fn(&str) + Send + Sync>>>,
}

impl FakeStorage {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    pub fn reference(path: &str) -> String {
        format!("mem://{path}")
    }

    /// Puts an object in place as if uploaded by an earlier save.
    pub fn preload(&self, path: &str) -> String {
        let reference = Self::reference(path);
        self.objects.lock().unwrap().insert(reference.clone(), vec![1]);
        reference
    }

    /// Uploads of a file with this original name fail.
    pub fn fail_upload_of(&self, file_name: &str) {
        self.failing_uploads.lock().unwrap().insert(file_name.to_string());
    }

    pub fn fail_delete_of(&self, reference: &str) {
        self.failing_deletes.lock().unwrap().insert(reference.to_string());
    }

    /// Runs after every successful upload, with the original file name.
    pub fn after_upload(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
        *self.on_upload.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.objects.lock().unwrap().contains_key(reference)
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn references(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(
        &self,
        file: &StagedFile,
        path: &str,
        on_progress: Option<ProgressCallback>,
    ) -> Result<String> {
        if self.failing_uploads.lock().unwrap().contains(&file.name) {
            if let Some(report) = &on_progress {
                report(0);
            }
            return Err(FolioError::storage(format!("injected upload failure for {}", file.name)));
        }

        let reference = Self::reference(path);
        if let Some(report) = &on_progress {
            report(50);
            report(100);
        }
        self.objects
            .lock()
            .unwrap()
            .insert(reference.clone(), file.data.clone());
        self.log.push(Call::Upload {
            path: path.to_string(),
            reference: reference.clone(),
        });
        if let Some(hook) = self.on_upload.lock().unwrap().as_ref() {
            hook(&file.name);
        }
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        self.log.push(Call::DeleteObject {
            reference: reference.to_string(),
        });
        if self.failing_deletes.lock().unwrap().contains(reference) {
            return Err(FolioError::storage("injected delete failure"));
        }
        self.objects.lock().unwrap().remove(reference);
        Ok(())
    }
}
