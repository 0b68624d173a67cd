// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod feed;
pub mod studylab;

// Re-export main types
pub use feed::{
    Article, ContentKind, FeedBatch, FeedConfig, FeedError, FeedService, GenerationRequest,
    GenerativeProvider, Judgment, NewsItem, RecordFilter, RetryPolicy, Reviewable, Statute,
};
pub use studylab::{BriefingNote, Flashcard, MindMap, MindMapBranch, StudyKit, StudyLabService};
