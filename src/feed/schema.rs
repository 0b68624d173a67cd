// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Strict response schemas for batch generation requests
//!
//! Schemas use the Gemini structured-output dialect (uppercase type names).
//! Property names match the serde wire names of the record types so the
//! payload deserializes directly.

use serde_json::{json, Value};

use super::types::ContentKind;

/// Response schema for one batch fetch of the given kind
pub fn batch_schema(kind: ContentKind) -> Value {
    match kind {
        ContentKind::News | ContentKind::JurisdictionFeed => array_of(json!({
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "summary": { "type": "STRING" },
                "sourceUrl": { "type": "STRING" },
                "secondaryUrl": { "type": "STRING" },
                "publishedDate": { "type": "STRING" }
            },
            "required": ["title", "summary", "sourceUrl"]
        })),
        ContentKind::Articles => array_of(json!({
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "summary": { "type": "STRING" },
                "author": { "type": "STRING" },
                "sourceUrl": { "type": "STRING" },
                "alternateUrl": { "type": "STRING" }
            },
            "required": ["title", "summary", "sourceUrl"]
        })),
        ContentKind::Judgments => array_of(json!({
            "type": "OBJECT",
            "properties": {
                "caseName": { "type": "STRING" },
                "summary": { "type": "STRING" },
                "court": { "type": "STRING" },
                "decidedOn": { "type": "STRING" },
                "sourceUrl": { "type": "STRING" },
                "pdfUrl": { "type": "STRING" }
            },
            "required": ["caseName", "summary", "sourceUrl"]
        })),
        ContentKind::Statutes => array_of(json!({
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "summary": { "type": "STRING" },
                "jurisdiction": { "type": "STRING" },
                "sourceUrl": { "type": "STRING" },
                "downloadUrl": { "type": "STRING" }
            },
            "required": ["name", "summary", "sourceUrl"]
        })),
    }
}

fn array_of(items: Value) -> Value {
    json!({
        "type": "ARRAY",
        "items": items
    })
}
