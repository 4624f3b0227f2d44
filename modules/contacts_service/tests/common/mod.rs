//! Common test utilities: vendor record fixtures and a recording CRM mock

#![allow(dead_code)]

use async_trait::async_trait;
use contacts_service::contract::{Revision, VendorInfo, VendorRecord};
use contacts_service::domain::{CrmError, CrmProvider};
use parking_lot::RwLock;
use serde_json::json;
use std::collections::HashMap;

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}

/// Vendor record with a name and optional revision
pub fn record(id: &str, first: &str, last: &str, revision: Option<u64>) -> VendorRecord {
    let mut value = json!({
        "_id": id,
        "info": {"name": {"first": first, "last": last}},
    });
    if let Some(revision) = revision {
        value["revision"] = json!(revision);
    }
    VendorRecord::from_response(value).unwrap()
}

/// Vendor record with name, email and phone
pub fn full_record(id: &str, first: &str, last: &str, email: &str, phone: &str) -> VendorRecord {
    VendorRecord::from_response(json!({
        "_id": id,
        "revision": 1,
        "info": {
            "name": {"first": first, "last": last},
            "emails": {"items": [{"email": email, "primary": true}]},
            "phones": {"items": [{"phone": phone, "primary": true, "tag": "MOBILE"}]}
        }
    }))
    .unwrap()
}

/// One call received by [`MockCrm`]
#[derive(Debug, Clone, PartialEq)]
pub enum CrmCall {
    List,
    Get(String),
    Create(VendorInfo),
    Update(String, VendorInfo, Revision),
    Archive(String, Revision),
}

/// Operation keys for [`MockCrm::fail`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrmOp {
    List,
    Get,
    Create,
    Update,
    Archive,
}

/// CRM mock that records every call and can be told to fail an operation.
/// It does not check revisions; tests assert on the recorded calls instead.
#[derive(Default)]
pub struct MockCrm {
    records: RwLock<Vec<VendorRecord>>,
    calls: RwLock<Vec<CrmCall>>,
    failures: RwLock<HashMap<CrmOp, CrmError>>,
}

impl MockCrm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<VendorRecord>) -> Self {
        let crm = Self::default();
        *crm.records.write() = records;
        crm
    }

    pub fn fail(&self, op: CrmOp, error: CrmError) {
        self.failures.write().insert(op, error);
    }

    pub fn calls(&self) -> Vec<CrmCall> {
        self.calls.read().clone()
    }

    pub fn count(&self, op: CrmOp) -> usize {
        self.calls
            .read()
            .iter()
            .filter(|call| {
                matches!(
                    (op, call),
                    (CrmOp::List, CrmCall::List)
                        | (CrmOp::Get, CrmCall::Get(_))
                        | (CrmOp::Create, CrmCall::Create(_))
                        | (CrmOp::Update, CrmCall::Update(..))
                        | (CrmOp::Archive, CrmCall::Archive(..))
                )
            })
            .count()
    }

    fn record_call(&self, op: CrmOp, call: CrmCall) -> Result<(), CrmError> {
        self.calls.write().push(call);
        match self.failures.read().get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn find(&self, id: &str) -> Result<VendorRecord, CrmError> {
        self.records
            .read()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| CrmError::NotFound { id: id.to_string() })
    }
}

#[async_trait]
impl CrmProvider for MockCrm {
    async fn list(&self) -> Result<Vec<VendorRecord>, CrmError> {
        self.record_call(CrmOp::List, CrmCall::List)?;
        Ok(self.records.read().clone())
    }

    async fn get(&self, id: &str) -> Result<VendorRecord, CrmError> {
        self.record_call(CrmOp::Get, CrmCall::Get(id.to_string()))?;
        self.find(id)
    }

    async fn create(&self, info: VendorInfo) -> Result<VendorRecord, CrmError> {
        self.record_call(CrmOp::Create, CrmCall::Create(info.clone()))?;
        let record = VendorRecord {
            id: format!("created-{}", self.records.read().len() + 1),
            revision: Some(Revision(1)),
            info,
            ..VendorRecord::default()
        };
        self.records.write().push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: &str,
        info: VendorInfo,
        revision: Revision,
    ) -> Result<VendorRecord, CrmError> {
        self.record_call(
            CrmOp::Update,
            CrmCall::Update(id.to_string(), info.clone(), revision),
        )?;
        let mut record = self.find(id)?;
        record.info = info;
        record.revision = Some(revision.next());
        Ok(record)
    }

    async fn archive(&self, id: &str, revision: Revision) -> Result<VendorRecord, CrmError> {
        self.record_call(CrmOp::Archive, CrmCall::Archive(id.to_string(), revision))?;
        let record = self.find(id)?;
        self.records.write().retain(|r| r.id != id);
        Ok(record)
    }
}
