//! TF-IDF vectorizer: text → n-grams → sublinear tf × smoothed idf → L2-normalized sparse vector.

use super::{FeatureVector, Tokenizer};
use crate::config::FeaturesConfig;
use crate::error::{DetectorError, Result};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Fitted n-gram vocabulary. Indices follow lexical order of the retained n-grams.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f64>,
    n_documents: usize,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn idf(&self, index: usize) -> Option<f64> {
        self.idf.get(index).copied()
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}

pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    vocabulary: Vocabulary,
    sublinear_tf: bool,
}

impl TfidfVectorizer {
    /// Build the vocabulary from a corpus of documents.
    pub fn fit<'a, I>(documents: I, config: &FeaturesConfig) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        config.validate()?;
        let tokenizer = Tokenizer::new(config.ngram_min, config.ngram_max, config.lowercase);

        let mut n_documents = 0usize;
        let mut term_counts: HashMap<String, u64> = HashMap::new();
        let mut doc_freq: HashMap<String, u64> = HashMap::new();

        for doc in documents {
            n_documents += 1;
            let grams = tokenizer.ngrams(doc);
            let mut seen = HashSet::new();
            for g in grams {
                if seen.insert(g.clone()) {
                    *doc_freq.entry(g.clone()).or_insert(0) += 1;
                }
                *term_counts.entry(g).or_insert(0) += 1;
            }
        }

        if n_documents == 0 {
            return Err(DetectorError::training_data("corpus is empty"));
        }
        if term_counts.is_empty() {
            return Err(DetectorError::training_data(
                "corpus contains no extractable tokens",
            ));
        }

        let mut ranked: Vec<(String, u64)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(config.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t).collect();
        terms.sort();

        let n = n_documents as f64;
        let idf = terms
            .iter()
            .map(|t| {
                let df = doc_freq.get(t).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        Ok(Self {
            tokenizer,
            vocabulary: Vocabulary {
                terms,
                index,
                idf,
                n_documents,
            },
            sublinear_tf: config.sublinear_tf,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// Out-of-vocabulary n-grams contribute nothing; a vector with no known n-grams stays zero.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for g in self.tokenizer.ngrams(text) {
            if let Some(i) = self.vocabulary.index_of(&g) {
                *counts.entry(i).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(i, c)| {
                let tf = if self.sublinear_tf {
                    1.0 + (c as f64).ln()
                } else {
                    c as f64
                };
                (i, tf * self.vocabulary.idf[i])
            })
            .collect();

        let norm = entries.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in entries.iter_mut() {
                *v /= norm;
            }
        }

        FeatureVector {
            dim: self.dim(),
            entries,
        }
    }

    pub fn transform_batch<'a, I>(&self, documents: I) -> Vec<FeatureVector>
    where
        I: IntoIterator<Item = &'a str>,
    {
        documents.into_iter().map(|d| self.transform(d)).collect()
    }
}
