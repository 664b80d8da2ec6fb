//! Multiplying fixture items by random sampling
//!
//! [`weave`] takes a handful of template objects and appends clones of
//! randomly chosen templates, optionally swapping field values for random
//! candidates. It is independent of the loom pipeline; its output is just a
//! longer list that can be fed to one.

use std::collections::BTreeMap;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::WeaveError;

/// Number of items added when no amount is configured
pub const DEFAULT_AMOUNT: usize = 10;

/// Post-processing hook: receives each woven item and its index
pub type Customizer<T> = Box<dyn Fn(T, usize) -> T + Send + Sync>;

/// Options for [`weave`]
pub struct WeaveOptions<T> {
    /// How many items to add
    pub amount: usize,
    /// Candidate values per field name
    pub fields: BTreeMap<String, Vec<Value>>,
    pub customizer: Option<Customizer<T>>,
    /// Seed for reproducible output; `None` draws a fresh seed
    pub seed: Option<u64>,
}

impl<T> WeaveOptions<T> {
    pub fn new(amount: usize) -> Self {
        Self {
            amount,
            fields: BTreeMap::new(),
            customizer: None,
            seed: None,
        }
    }

    pub fn amount(mut self, amount: usize) -> Self {
        self.amount = amount;
        self
    }

    /// Randomize `name` from `candidates` on every woven item that has it
    pub fn field<V>(mut self, name: impl Into<String>, candidates: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        self.fields
            .insert(name.into(), candidates.into_iter().map(Into::into).collect());
        self
    }

    pub fn customizer<F>(mut self, customizer: F) -> Self
    where
        F: Fn(T, usize) -> T + Send + Sync + 'static,
    {
        self.customizer = Some(Box::new(customizer));
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl<T> Default for WeaveOptions<T> {
    fn default() -> Self {
        Self::new(DEFAULT_AMOUNT)
    }
}

impl<T> fmt::Debug for WeaveOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeaveOptions")
            .field("amount", &self.amount)
            .field("fields", &self.fields)
            .field("has_customizer", &self.customizer.is_some())
            .field("seed", &self.seed)
            .finish()
    }
}

/// Weave `options.amount` new items after `templates`
///
/// The result starts with the templates in order. Each added item is a
/// clone of a uniformly chosen template; every configured field present on
/// the clone with at least one candidate gets a random candidate, and the
/// customizer (if any) runs last.
///
/// # Errors
///
/// - [`WeaveError::NoTemplates`] if `templates` is empty
/// - [`WeaveError::InvalidAmount`] if `amount` is zero
/// - [`WeaveError::NotAnObject`] if fields are configured but a chosen
///   template does not serialize to an object
/// - [`WeaveError::Field`] if a candidate does not fit the item type
pub fn weave<T>(templates: &[T], options: &WeaveOptions<T>) -> Result<Vec<T>, WeaveError>
where
    T: Clone + Serialize + DeserializeOwned,
{
    if templates.is_empty() {
        return Err(WeaveError::NoTemplates);
    }
    if options.amount == 0 {
        return Err(WeaveError::InvalidAmount);
    }

    let mut rng = match options.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };

    let mut result = Vec::with_capacity(templates.len() + options.amount);
    result.extend_from_slice(templates);

    for i in 0..options.amount {
        let index = rng.random_range(0..templates.len());
        let mut item = randomize_fields(&mut rng, &templates[index], index, &options.fields)?;

        if let Some(customizer) = &options.customizer {
            item = customizer(item, i);
        }

        result.push(item);
    }

    tracing::debug!(
        templates = templates.len(),
        woven = options.amount,
        seeded = options.seed.is_some(),
        "wove fixture items"
    );

    Ok(result)
}

/// [`weave`] for a single template object
pub fn weave_one<T>(template: &T, options: &WeaveOptions<T>) -> Result<Vec<T>, WeaveError>
where
    T: Clone + Serialize + DeserializeOwned,
{
    weave(std::slice::from_ref(template), options)
}

fn randomize_fields<T, R>(
    rng: &mut R,
    template: &T,
    index: usize,
    fields: &BTreeMap<String, Vec<Value>>,
) -> Result<T, WeaveError>
where
    T: Clone + Serialize + DeserializeOwned,
    R: Rng,
{
    if fields.values().all(Vec::is_empty) {
        return Ok(template.clone());
    }

    let mut value = serde_json::to_value(template)?;
    let Value::Object(object) = &mut value else {
        return Err(WeaveError::NotAnObject { index });
    };

    let mut changed = Vec::new();
    for (field, candidates) in fields {
        if candidates.is_empty() {
            continue;
        }
        if let Some(slot) = object.get_mut(field) {
            *slot = candidates[rng.random_range(0..candidates.len())].clone();
            changed.push(field.as_str());
        }
    }

    serde_json::from_value(value).map_err(|source| WeaveError::Field {
        field: changed.join(", "),
        source,
    })
}
