// history.rs

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Counts reported by a load, one per phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Lines installed by the bulk replace pass.
    pub installed: usize,
    /// Lines handed to single-entry insertion.
    pub inserted: usize,
}

/// Prompt history, oldest entry first.
///
/// The capacity is not stored here: every call that can grow the list takes
/// it as an argument, so a changed limit applies from the next call on.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: VecDeque<String>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self { entries: VecDeque::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> + '_ {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries = VecDeque::new();
    }

    /// Records one new entry.
    ///
    /// Empty lines and a repeat of the newest entry are ignored. When the list
    /// is full the oldest entries are evicted to make room.
    pub fn add(&mut self, line: impl Into<String>, capacity: usize) {
        let line = line.into();
        if line.is_empty() || line.contains('\n') {
            return;
        }
        if self.entries.back() == Some(&line) {
            return;
        }
        if capacity == 0 {
            return;
        }
        while self.entries.len() >= capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line);
    }

    /// Loads entries from `source`, routing overflow through [`HistoryStore::add`].
    pub fn load<R: BufRead>(&mut self, source: R, append: bool, capacity: usize) -> LoadSummary {
        self.load_with(source, append, capacity, |store, line| store.add(line, capacity))
    }

    /// Loads entries from `source`.
    ///
    /// Without `append` the first `capacity` lines replace the current
    /// contents outright. Every line after that, and every line when
    /// appending, goes through `insert` one at a time in file order.
    pub fn load_with<R, F>(
        &mut self,
        mut source: R,
        append: bool,
        capacity: usize,
        mut insert: F,
    ) -> LoadSummary
    where
        R: BufRead,
        F: FnMut(&mut Self, String),
    {
        let mut buf = Vec::new();
        let mut summary = LoadSummary::default();
        let mut exhausted = false;

        if !append {
            let mut fresh = VecDeque::new();
            while fresh.len() < capacity {
                match next_entry(&mut source, &mut buf) {
                    Some(entry) => fresh.push_back(entry),
                    None => {
                        exhausted = true;
                        break;
                    }
                }
            }
            fresh.shrink_to_fit();
            summary.installed = fresh.len();
            self.entries = fresh;
        }

        if !exhausted {
            while let Some(entry) = next_entry(&mut source, &mut buf) {
                insert(self, entry);
                summary.inserted += 1;
            }
        }

        // a limit lowered since the last call still binds when nothing was inserted
        while self.entries.len() > capacity {
            self.entries.pop_front();
        }

        debug!(
            append,
            capacity,
            installed = summary.installed,
            inserted = summary.inserted,
            total = self.entries.len(),
            "history loaded"
        );
        summary
    }

    /// Writes every entry, oldest first, one per line.
    pub fn save<W: Write>(&self, mut sink: W) -> io::Result<()> {
        for entry in &self.entries {
            sink.write_all(entry.as_bytes())?;
            sink.write_all(b"\n")?;
        }
        debug!(count = self.entries.len(), "history saved");
        Ok(())
    }

    #[cfg(test)]
    fn allocated(&self) -> usize {
        self.entries.capacity()
    }
}

/// Reads the next line that qualifies as an entry.
///
/// A raw line, newline included, must be longer than one byte. Read errors
/// end the stream.
fn next_entry<R: BufRead>(source: &mut R, buf: &mut Vec<u8>) -> Option<String> {
    loop {
        buf.clear();
        match source.read_until(b'\n', buf) {
            Ok(0) | Err(_) => return None,
            Ok(n) if n > 1 => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                return Some(String::from_utf8_lossy(buf).into_owned());
            }
            Ok(_) => continue,
        }
    }
}
