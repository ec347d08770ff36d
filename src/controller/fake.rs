//! In-memory controller for processor tests.

use crate::controller::{ApiResponse, Collection, Controller};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Default)]
pub struct FakeController {
    listings: RefCell<HashMap<Collection, ApiResponse>>,
    update_responses: RefCell<HashMap<String, ApiResponse>>,
    list_calls: RefCell<Vec<Collection>>,
    update_calls: RefCell<Vec<(Collection, String, Value)>>,
}

impl FakeController {
    pub fn with_items(self, collection: Collection, items: Value) -> Self {
        self.respond_to_list(collection, 200, json!({ "items": items }));
        self
    }

    pub fn respond_to_list(&self, collection: Collection, status: u16, body: Value) {
        self.listings
            .borrow_mut()
            .insert(collection, ApiResponse::new(status, body));
    }

    pub fn respond_to_update(&self, id: &str, status: u16, body: Value) {
        self.update_responses
            .borrow_mut()
            .insert(id.to_string(), ApiResponse::new(status, body));
    }

    pub fn lists(&self) -> Vec<Collection> {
        self.list_calls.borrow().clone()
    }

    pub fn updates(&self) -> Vec<(Collection, String, Value)> {
        self.update_calls.borrow().clone()
    }
}

impl Controller for FakeController {
    fn list(&self, collection: &Collection) -> anyhow::Result<ApiResponse> {
        self.list_calls.borrow_mut().push(collection.clone());
        Ok(self
            .listings
            .borrow()
            .get(collection)
            .cloned()
            .unwrap_or_else(|| ApiResponse::new(200, json!({ "items": [] }))))
    }

    fn update(
        &self,
        collection: &Collection,
        id: &str,
        body: &Value,
    ) -> anyhow::Result<ApiResponse> {
        self.update_calls
            .borrow_mut()
            .push((collection.clone(), id.to_string(), body.clone()));
        // echo the submitted object unless a response was scripted
        Ok(self
            .update_responses
            .borrow()
            .get(id)
            .cloned()
            .unwrap_or_else(|| ApiResponse::new(200, body.clone())))
    }
}
