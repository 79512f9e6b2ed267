//! Word Vectors - an in-memory embedding space
//!
//! Loads word2vec files (binary or text) and answers the three questions the
//! sampler asks: what is this word's vector, which words are closest to this
//! point, and what does the vocabulary look like in its native order.
//!
//! `LazyProvider` wraps loading behind a lock so the (slow, multi-gigabyte)
//! load happens once per process, on first use.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use rayon::prelude::*;
use serendip_core::{
    norm, Candidate, EmbeddingProvider, SerendipError, SerendipResult, Vector,
};
use tracing::{debug, info};

/// Dense, row-major embedding table
pub struct WordVectors {
    /// Vocabulary in native (file) order
    words: Vec<String>,
    /// word -> row
    index: HashMap<String, usize>,
    dims: usize,
    /// Raw vectors, `words.len() * dims`
    vectors: Vec<f32>,
    /// Unit-length copies used for cosine ranking
    unit: Vec<f32>,
}

impl fmt::Debug for WordVectors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordVectors")
            .field("len", &self.words.len())
            .field("dims", &self.dims)
            .finish()
    }
}

impl WordVectors {
    /// Build from (word, vector) pairs.
    ///
    /// Every vector must have `dims` components. A repeated word keeps its
    /// first vector.
    pub fn from_entries<I>(dims: usize, entries: I) -> SerendipResult<Self>
    where
        I: IntoIterator<Item = (String, Vector)>,
    {
        if dims == 0 {
            return Err(SerendipError::provider("embedding dimension must be greater than 0"));
        }

        let mut words = Vec::new();
        let mut index = HashMap::new();
        let mut vectors = Vec::new();

        for (word, vector) in entries {
            if vector.len() != dims {
                return Err(SerendipError::DimensionMismatch {
                    expected: dims,
                    got: vector.len(),
                });
            }
            if index.contains_key(&word) {
                continue;
            }
            index.insert(word.clone(), words.len());
            words.push(word);
            vectors.extend_from_slice(&vector);
        }

        let mut unit = vectors.clone();
        unit.par_chunks_mut(dims).for_each(|row| {
            serendip_core::normalize(row);
        });

        Ok(Self {
            words,
            index,
            dims,
            vectors,
            unit,
        })
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Vocabulary in native order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Borrowed vector for a word
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.index.get(word).map(|&i| self.row(i))
    }

    fn row(&self, i: usize) -> &[f32] {
        &self.vectors[i * self.dims..(i + 1) * self.dims]
    }
}

impl EmbeddingProvider for WordVectors {
    fn dimensions(&self) -> usize {
        self.dims
    }

    fn vector_of(&self, word: &str) -> Option<Vector> {
        self.get(word).map(<[f32]>::to_vec)
    }

    fn nearest(&self, vector: &[f32], top_n: usize) -> SerendipResult<Vec<Candidate>> {
        if vector.len() != self.dims {
            return Err(SerendipError::DimensionMismatch {
                expected: self.dims,
                got: vector.len(),
            });
        }
        if top_n == 0 || self.words.is_empty() {
            return Ok(Vec::new());
        }

        // Cosine against pre-normalized rows: only the query needs scaling
        let query_norm = norm(vector);
        let inv = if query_norm > f32::EPSILON { 1.0 / query_norm } else { 0.0 };

        let mut scored: Vec<(usize, f32)> = self
            .unit
            .par_chunks(self.dims)
            .enumerate()
            .map(|(i, row)| {
                let dot: f32 = row.iter().zip(vector).map(|(a, b)| a * b).sum();
                (i, dot * inv)
            })
            .collect();

        // Descending similarity, ties in vocabulary order
        let by_rank = |a: &(usize, f32), b: &(usize, f32)| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0));

        let keep = top_n.min(scored.len());
        if keep < scored.len() {
            scored.select_nth_unstable_by(keep - 1, by_rank);
            scored.truncate(keep);
        }
        scored.sort_unstable_by(by_rank);

        debug!(
            "nearest: top {} of {} words (best {:.3})",
            scored.len(),
            self.words.len(),
            scored.first().map(|s| s.1).unwrap_or(0.0)
        );

        Ok(scored
            .into_iter()
            .map(|(i, similarity)| Candidate::new(self.words[i].clone(), similarity))
            .collect())
    }

    fn sample_vocabulary(&self, limit: usize) -> Vec<String> {
        self.words.iter().take(limit).cloned().collect()
    }

    fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn name(&self) -> &str {
        "word2vec"
    }
}

/// On-disk embedding formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelFormat {
    /// word2vec C binary: `count dims\n` then `word ` + little-endian f32s
    Binary,
    /// word2vec/GloVe text: one `word f1 f2 ...` per line, optional header
    Text,
}

impl ModelFormat {
    /// `.bin` is binary, everything else is text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Self::Binary,
            _ => Self::Text,
        }
    }
}

/// Load a word2vec file, keeping at most `limit` vectors
pub fn load_word2vec(path: &Path, limit: Option<usize>) -> SerendipResult<WordVectors> {
    let file = File::open(path).map_err(|e| {
        SerendipError::provider(format!("cannot open model {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    let result = match ModelFormat::from_path(path) {
        ModelFormat::Binary => read_binary(reader, limit),
        ModelFormat::Text => read_text(reader, limit),
    };

    result.map_err(|e| match e {
        SerendipError::ProviderUnavailable(msg) => {
            SerendipError::provider(format!("{}: {}", path.display(), msg))
        }
        SerendipError::Io(io) => {
            SerendipError::provider(format!("{}: read failed: {}", path.display(), io))
        }
        other => other,
    })
}

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let count = parts.next()?.parse().ok()?;
    let dims = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((count, dims))
}

/// Widest vector a model file may declare
const MAX_DIMS: usize = 1 << 16;

/// Rows reserved up front; the header count is not trusted beyond this
const MAX_PREALLOC: usize = 1 << 20;

/// word2vec binary format
pub fn read_binary<R: BufRead>(
    mut reader: R,
    limit: Option<usize>,
) -> SerendipResult<WordVectors> {
    let mut header = String::new();
    reader.read_line(&mut header)?;
    let (count, dims) = parse_header(&header).ok_or_else(|| {
        SerendipError::provider(format!("bad header line: {:?}", header.trim()))
    })?;
    if dims == 0 || dims > MAX_DIMS {
        return Err(SerendipError::provider(format!(
            "implausible vector width {dims} in header"
        )));
    }
    let row_bytes = dims
        .checked_mul(4)
        .ok_or_else(|| SerendipError::provider(format!("vector width {dims} overflows")))?;

    let wanted = limit.map_or(count, |l| l.min(count));
    let mut entries = Vec::with_capacity(wanted.min(MAX_PREALLOC));
    let mut raw = vec![0u8; row_bytes];
    let mut word = Vec::new();

    for n in 0..wanted {
        word.clear();
        reader.read_until(b' ', &mut word)?;
        if word.last() != Some(&b' ') {
            return Err(SerendipError::provider(format!(
                "truncated after {n} of {count} vectors"
            )));
        }
        word.pop();
        // Some writers put a newline after each vector
        let start = word.iter().position(|b| *b != b'\n').unwrap_or(word.len());
        let token = String::from_utf8_lossy(&word[start..]).into_owned();

        reader.read_exact(&mut raw).map_err(|e| {
            SerendipError::provider(format!("vector {n} of {count} unreadable: {e}"))
        })?;
        let vector: Vector = raw
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        entries.push((token, vector));
    }

    WordVectors::from_entries(dims, entries)
}

/// word2vec text format (header optional, GloVe style files work too)
pub fn read_text<R: BufRead>(reader: R, limit: Option<usize>) -> SerendipResult<WordVectors> {
    let mut dims: Option<usize> = None;
    let mut entries = Vec::new();
    let wanted = limit.unwrap_or(usize::MAX);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if line_no == 0 {
            if let Some((_, d)) = parse_header(line) {
                dims = Some(d);
                continue;
            }
        }
        if entries.len() >= wanted {
            break;
        }

        let mut parts = line.split(' ');
        let word = parts.next().unwrap_or_default().to_string();
        let vector = parts
            .map(str::parse::<f32>)
            .collect::<Result<Vector, _>>()
            .map_err(|e| SerendipError::provider(format!("line {}: {}", line_no + 1, e)))?;

        let expected = *dims.get_or_insert(vector.len());
        if vector.len() != expected {
            return Err(SerendipError::provider(format!(
                "line {}: expected {} components, got {}",
                line_no + 1,
                expected,
                vector.len()
            )));
        }
        entries.push((word, vector));
    }

    let dims = dims.ok_or_else(|| SerendipError::provider("model file is empty"))?;
    WordVectors::from_entries(dims, entries)
}

type Loader = Box<dyn Fn() -> SerendipResult<WordVectors> + Send + Sync>;

/// Load-once handle to the embedding space
///
/// The first `get` runs the loader under a lock; later calls share the
/// cached `Arc`. A failed load is not cached, so the caller decides whether
/// to try again.
pub struct LazyProvider {
    label: String,
    loader: Loader,
    cached: Mutex<Option<Arc<WordVectors>>>,
}

impl LazyProvider {
    /// Lazily load a word2vec file
    pub fn from_path(path: impl Into<PathBuf>, limit: Option<usize>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self::with_loader(label, move || load_word2vec(&path, limit))
    }

    /// Lazily run any loader
    pub fn with_loader<F>(label: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> SerendipResult<WordVectors> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            loader: Box::new(loader),
            cached: Mutex::new(None),
        }
    }

    /// The shared embedding space, loading it on first call
    pub fn get(&self) -> SerendipResult<Arc<WordVectors>> {
        let mut cached = self.cached.lock();
        if let Some(vectors) = cached.as_ref() {
            return Ok(Arc::clone(vectors));
        }

        info!("📚 Loading embeddings from {}...", self.label);
        let start = Instant::now();
        let vectors = Arc::new((self.loader)()?);
        info!(
            "📚 Loaded {} words x {} dims in {:.1}s",
            vectors.len(),
            vectors.dimensions(),
            start.elapsed().as_secs_f32()
        );

        *cached = Some(Arc::clone(&vectors));
        Ok(vectors)
    }

    /// Has the space been loaded yet?
    pub fn is_loaded(&self) -> bool {
        self.cached.lock().is_some()
    }
}
