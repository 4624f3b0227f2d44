//! In-memory CRM provider
//!
//! Behaves like the vendor for the operations the service uses: ids and
//! revisions are assigned here, every mutation bumps the revision, a stale
//! revision is rejected, and archived contacts disappear from `list`/`get`.

use crate::contract::{Revision, VendorInfo, VendorRecord};
use crate::domain::crm::{CrmError, CrmProvider};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

struct Entry {
    record: VendorRecord,
    archived: bool,
}

#[derive(Default)]
pub struct InMemoryCrm {
    entries: RwLock<Vec<Entry>>,
}

impl InMemoryCrm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record verbatim (id and revision are not touched)
    pub fn insert(&self, record: VendorRecord) {
        self.entries.write().push(Entry {
            record,
            archived: false,
        });
    }

    /// Number of non-archived contacts
    pub fn len(&self) -> usize {
        self.entries.read().iter().filter(|e| !e.archived).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_live_entry<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Entry) -> Result<T, CrmError>,
    ) -> Result<T, CrmError> {
        let mut entries = self.entries.write();
        let entry = entries
            .iter_mut()
            .find(|e| !e.archived && e.record.id == id)
            .ok_or_else(|| CrmError::NotFound { id: id.to_string() })?;
        f(entry)
    }
}

fn check_revision(record: &VendorRecord, sent: Revision) -> Result<(), CrmError> {
    if record.revision.unwrap_or_default() != sent {
        return Err(CrmError::RevisionConflict {
            id: record.id.clone(),
            sent,
        });
    }
    Ok(())
}

fn touch(record: &mut VendorRecord) {
    record.revision = Some(record.revision.unwrap_or_default().next());
    record.extra.insert(
        "updatedDate".to_string(),
        Value::String(chrono::Utc::now().to_rfc3339()),
    );
}

#[async_trait]
impl CrmProvider for InMemoryCrm {
    async fn list(&self) -> Result<Vec<VendorRecord>, CrmError> {
        Ok(self
            .entries
            .read()
            .iter()
            .filter(|e| !e.archived)
            .map(|e| e.record.clone())
            .collect())
    }

    async fn get(&self, id: &str) -> Result<VendorRecord, CrmError> {
        self.with_live_entry(id, |entry| Ok(entry.record.clone()))
    }

    async fn create(&self, info: VendorInfo) -> Result<VendorRecord, CrmError> {
        let now = Value::String(chrono::Utc::now().to_rfc3339());
        let mut record = VendorRecord {
            id: uuid::Uuid::new_v4().to_string(),
            revision: Some(Revision(1)),
            info,
            ..VendorRecord::default()
        };
        record.extra.insert("createdDate".to_string(), now.clone());
        record.extra.insert("updatedDate".to_string(), now);

        self.insert(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: &str,
        info: VendorInfo,
        revision: Revision,
    ) -> Result<VendorRecord, CrmError> {
        self.with_live_entry(id, |entry| {
            check_revision(&entry.record, revision)?;

            let stored = &mut entry.record.info;
            if info.name.is_some() {
                stored.name = info.name;
            }
            if info.emails.is_some() {
                stored.emails = info.emails;
            }
            if info.phones.is_some() {
                stored.phones = info.phones;
            }
            stored.extra.extend(info.extra);

            touch(&mut entry.record);
            Ok(entry.record.clone())
        })
    }

    async fn archive(&self, id: &str, revision: Revision) -> Result<VendorRecord, CrmError> {
        self.with_live_entry(id, |entry| {
            check_revision(&entry.record, revision)?;
            entry.archived = true;
            touch(&mut entry.record);
            Ok(entry.record.clone())
        })
    }
}
