use super::tokenizer::tokenize;
use crate::workflows::selection::domain::Course;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Term-frequency saturation.
pub const K1: f64 = 1.5;
/// Document-length normalization.
pub const B: f64 = 0.75;

/// A scored course, carrying the text shown alongside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub code: String,
    pub title: String,
    pub description: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
struct IndexedDocument {
    code: String,
    title: String,
    description: String,
    length: usize,
}

/// Okapi BM25 inverted index built once from the catalog.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    documents: Vec<IndexedDocument>,
    postings: HashMap<String, Vec<(usize, u32)>>,
    average_length: f64,
}

impl SearchIndex {
    pub fn build<'a, I>(courses: I) -> Self
    where
        I: IntoIterator<Item = &'a Course>,
    {
        let mut documents = Vec::new();
        let mut postings: HashMap<String, Vec<(usize, u32)>> = HashMap::new();

        for course in courses {
            let tokens = tokenize(&format!("{} {}", course.title, course.description));
            let doc = documents.len();

            let mut frequencies: HashMap<String, u32> = HashMap::new();
            for token in &tokens {
                *frequencies.entry(token.clone()).or_default() += 1;
            }
            for (token, tf) in frequencies {
                postings.entry(token).or_default().push((doc, tf));
            }

            documents.push(IndexedDocument {
                code: course.code.clone(),
                title: course.title.clone(),
                description: course.description.clone(),
                length: tokens.len(),
            });
        }

        let total: usize = documents.iter().map(|doc| doc.length).sum();
        let average_length = if documents.is_empty() {
            0.0
        } else {
            total as f64 / documents.len() as f64
        };

        Self {
            documents,
            postings,
            average_length,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Score `query` and return at most `limit` hits, best first.
    ///
    /// A non-empty `eligible` restricts scoring to those codes. Only documents containing at
    /// least one query token are returned. Repeated query tokens count once per occurrence.
    pub fn search(&self, query: &str, eligible: &[String], limit: usize) -> Vec<SearchHit> {
        let filter: HashSet<&str> = eligible.iter().map(String::as_str).collect();
        let total = self.documents.len() as f64;
        let mut scores: HashMap<usize, f64> = HashMap::new();

        for token in tokenize(query) {
            let Some(postings) = self.postings.get(&token) else {
                continue;
            };
            let df = postings.len() as f64;
            let idf = ((total - df + 0.5) / (df + 0.5) + 1.0).ln();

            for &(doc, tf) in postings {
                let document = &self.documents[doc];
                if !filter.is_empty() && !filter.contains(document.code.as_str()) {
                    continue;
                }
                let tf = f64::from(tf);
                let norm = 1.0 - B + B * document.length as f64 / self.average_length;
                *scores.entry(doc).or_default() += idf * (tf * (K1 + 1.0)) / (tf + K1 * norm);
            }
        }

        let mut ranked: Vec<(usize, f64)> = scores.into_iter().collect();
        ranked.sort_by(|(left_doc, left), (right_doc, right)| {
            let left_code = &self.documents[*left_doc].code;
            let right_code = &self.documents[*right_doc].code;
            right
                .partial_cmp(left)
                .unwrap_or(Ordering::Equal)
                .then_with(|| left_code.cmp(right_code))
        });
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(doc, score)| {
                let document = &self.documents[doc];
                SearchHit {
                    code: document.code.clone(),
                    title: document.title.clone(),
                    description: document.description.clone(),
                    score,
                }
            })
            .collect()
    }
}
