// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Study-lab artifact types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question/answer flashcard generated from pasted legal text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    /// Prompt side of the card
    pub question: String,
    /// Answer side of the card
    pub answer: String,
}

/// A mind map over the source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMap {
    /// Central topic of the map
    pub central_topic: String,
    /// First-level branches
    pub branches: Vec<MindMapBranch>,
}

/// One branch of a mind map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapBranch {
    /// Branch topic
    pub topic: String,
    /// Supporting points under this branch
    pub points: Vec<String>,
}

/// A structured briefing note over the source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefingNote {
    /// Short title for the note
    pub title: String,
    /// Material facts
    pub facts: String,
    /// Legal issues raised
    pub issues: Vec<String>,
    /// Holding or operative conclusion
    pub holding: String,
    /// Reasoning in brief
    pub reasoning: String,
    /// Practical significance if stated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub significance: Option<String>,
}

/// Everything the study lab produces for one source text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyKit {
    /// Generated flashcards
    pub flashcards: Vec<Flashcard>,
    /// Generated mind map
    pub mind_map: MindMap,
    /// Generated briefing note
    pub brief: BriefingNote,
    /// When the kit was generated
    pub generated_at: DateTime<Utc>,
}
