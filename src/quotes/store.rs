use crate::quotes::{Quote, QuoteUpdate};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};

/// In-memory quote collection for one client session
///
/// Quotes are keyed by id and kept in insertion order. Adding a quote whose
/// id is already present is rejected rather than overwriting the stored one.
#[derive(Debug, Clone, Default)]
pub struct QuoteStore {
    quotes: HashMap<String, Quote>,
    order: Vec<String>,
}

impl QuoteStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection with the two sample quotes
    pub fn load_sample(&mut self, topic: &str) {
        let now = Utc::now();
        self.clear_quotes();

        let samples = [
            Quote::new("1", "Love all, trust a few, do wrong to none.", "William Shakespeare"),
            Quote::new(
                "2",
                "The best thing to hold onto in life is each other.",
                "Audrey Hepburn",
            ),
        ];

        for quote in samples {
            self.insert(quote.with_topic(topic).with_created_at(now));
        }

        tracing::debug!(topic = %topic, "Loaded sample quotes");
    }

    /// Inserts a quote unless its id is already stored
    ///
    /// Stamps `created_at` with the current time when it is missing.
    ///
    /// # Returns
    ///
    /// * `true` - The quote was inserted
    /// * `false` - A quote with the same id exists; the store is unchanged
    pub fn add_quote(&mut self, mut quote: Quote) -> bool {
        if self.quotes.contains_key(&quote.id) {
            tracing::trace!(id = %quote.id, "Duplicate quote id ignored");
            return false;
        }

        if quote.created_at.is_none() {
            quote.created_at = Some(Utc::now());
        }

        self.insert(quote);
        true
    }

    /// Removes a quote by id, returning it when present
    pub fn remove_quote(&mut self, id: &str) -> Option<Quote> {
        let removed = self.quotes.remove(id)?;
        if let Some(pos) = self.order.iter().position(|k| k == id) {
            self.order.remove(pos);
        }
        Some(removed)
    }

    /// Merges `update` over the stored quote; the id never changes
    ///
    /// Returns `false` when no quote has this id.
    pub fn update_quote(&mut self, id: &str, update: QuoteUpdate) -> bool {
        match self.quotes.get_mut(id) {
            Some(quote) => {
                quote.apply(update);
                true
            }
            None => false,
        }
    }

    /// Empties the collection
    pub fn clear_quotes(&mut self) {
        self.quotes.clear();
        self.order.clear();
    }

    /// Adds every quote from a batch using the `add_quote` rules
    ///
    /// Returns how many quotes were actually inserted.
    pub fn extend_from_backend<I>(&mut self, quotes: I) -> usize
    where
        I: IntoIterator<Item = Quote>,
    {
        let mut inserted = 0;
        for quote in quotes {
            if self.add_quote(quote) {
                inserted += 1;
            }
        }
        tracing::debug!(inserted, total = self.count(), "Merged backend quotes");
        inserted
    }

    pub fn count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Quote> {
        self.quotes.get(id)
    }

    /// Iterates quotes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Quote> + '_ {
        self.order.iter().filter_map(|id| self.quotes.get(id))
    }

    /// Groups quotes by topic, quotes without one go to `"other"`
    ///
    /// Each bucket keeps insertion order and the buckets partition the store.
    pub fn by_topic(&self) -> BTreeMap<String, Vec<&Quote>> {
        let mut grouped: BTreeMap<String, Vec<&Quote>> = BTreeMap::new();
        for quote in self.iter() {
            grouped
                .entry(quote.topic_key().to_string())
                .or_default()
                .push(quote);
        }
        grouped
    }

    fn insert(&mut self, quote: Quote) {
        self.order.push(quote.id.clone());
        self.quotes.insert(quote.id.clone(), quote);
    }
}
