//! In-process evaluation of compiled generators.
//!
//! [`Sampler`] produces concrete JSON values from a [`Generator`], following the same
//! rules as the faker calls emitted into the mock module. It exists so generated bodies
//! can be inspected and checked against their schemas without a JavaScript runtime.
//! Output is deterministic for a given seed, except for past dates which are relative to
//! the current time.

use crate::config::GenerationOptions;
use crate::generator::{schema_to_generator, Generator, StringFormat};
use crate::spec::SchemaNode;
use chrono::{Duration, SecondsFormat, Utc};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Number, Value};

/// Largest integer exactly representable in a JavaScript number.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Longest array the sampler materializes, whatever `maxLength` declares.
pub const MAX_SAMPLED_ARRAY_LENGTH: u64 = 1000;

const MS_PER_YEAR: i64 = 365 * 24 * 60 * 60 * 1000;

const WORDS: [&str; 24] = [
    "alias", "amet", "aut", "beatae", "culpa", "dolor", "dolorem", "eius", "error", "harum",
    "ipsum", "iure", "labore", "magnam", "minus", "nemo", "nihil", "odio", "omnis", "quas",
    "quia", "sequi", "sunt", "velit",
];
const FIRST_NAMES: [&str; 10] = [
    "Ada", "Alan", "Barbara", "Dennis", "Edsger", "Grace", "Ken", "Linus", "Margaret", "Niklaus",
];
const LAST_NAMES: [&str; 10] = [
    "Hamilton", "Hopper", "Kernighan", "Knuth", "Liskov", "Lovelace", "Ritchie", "Thompson",
    "Turing", "Wirth",
];
const TLDS: [&str; 5] = ["com", "net", "org", "io", "dev"];

/// Evaluates generators with a seeded random source.
#[derive(Debug)]
pub struct Sampler {
    rng: StdRng,
    components: IndexMap<String, Generator>,
}

impl Sampler {
    pub fn new(seed: u64) -> Self {
        Sampler {
            rng: StdRng::seed_from_u64(seed),
            components: IndexMap::new(),
        }
    }

    /// Resolve registry references against `components`.
    ///
    /// Components are compiled without registry delegation, so their own references are
    /// sampled from the expanded definitions.
    pub fn with_components(mut self, components: &IndexMap<String, SchemaNode>, options: &GenerationOptions) -> Self {
        let inline = GenerationOptions {
            schema_registry_module: None,
            ..options.clone()
        };
        self.components = components
            .iter()
            .map(|(name, schema)| (name.clone(), schema_to_generator(Some(schema), &inline, None)))
            .collect();
        self
    }

    pub fn sample(&mut self, generator: &Generator) -> Value {
        match generator {
            Generator::Null => Value::Null,
            Generator::Literal(value) => value.clone(),
            Generator::OneOf(options) => match options.choose(&mut self.rng) {
                Some(option) => self.sample(option),
                None => Value::Null,
            },
            Generator::Registry(name) => match self.components.get(name).cloned() {
                Some(component) => self.sample(&component),
                None => {
                    tracing::debug!(component = %name, "unknown registry component, sampling null");
                    Value::Null
                }
            },
            Generator::Enum(values) => values.choose(&mut self.rng).cloned().unwrap_or(Value::Null),
            Generator::Text(format) => Value::String(self.text(*format)),
            Generator::Integer { min, max } => Value::Number(Number::from(self.integer(*min, *max))),
            Generator::Boolean => Value::Bool(self.rng.gen()),
            Generator::Record(value) => {
                let keys: Vec<&str> = WORDS
                    .choose_multiple(&mut self.rng, crate::generator::RECORD_ENTRIES)
                    .copied()
                    .collect();
                let mut map = Map::new();
                for key in keys {
                    map.insert(key.to_string(), self.sample(value));
                }
                Value::Object(map)
            }
            Generator::Object(props) => {
                let mut map = Map::new();
                for (name, value) in props {
                    map.insert(name.clone(), self.sample(value));
                }
                Value::Object(map)
            }
            Generator::Array { min, max, items } => {
                let lower = (*min).min(MAX_SAMPLED_ARRAY_LENGTH);
                let upper = max.value().min(MAX_SAMPLED_ARRAY_LENGTH);
                if max.value() > MAX_SAMPLED_ARRAY_LENGTH || *min > MAX_SAMPLED_ARRAY_LENGTH {
                    tracing::debug!(
                        min = *min,
                        max = max.value(),
                        cap = MAX_SAMPLED_ARRAY_LENGTH,
                        "array length capped"
                    );
                }
                let len = if lower >= upper {
                    lower
                } else {
                    self.rng.gen_range(lower..=upper)
                };
                (0..len).map(|_| self.sample(items)).collect()
            }
        }
    }

    /// Integer in `[ceil(min), floor(max)]`, defaulting to `[0, 2^53 - 1]`.
    ///
    /// When no integer fits (`min > max`, or fractional bounds such as `0.5..0.7`),
    /// `ceil(min)` is returned even though it exceeds `max`.
    fn integer(&mut self, min: Option<f64>, max: Option<f64>) -> i64 {
        let lo = min.map_or(0, |m| clamp_safe(m.ceil()));
        let hi = max.map_or(MAX_SAFE_INTEGER, |m| clamp_safe(m.floor()));
        if lo > hi {
            tracing::debug!(?min, ?max, value = lo, "no integer within bounds, using minimum");
            return lo;
        }
        if lo == hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn word(&mut self) -> &'static str {
        WORDS.choose(&mut self.rng).copied().unwrap_or("lorem")
    }

    fn domain(&mut self) -> String {
        let tld = TLDS.choose(&mut self.rng).copied().unwrap_or("com");
        format!("{}.{tld}", self.word())
    }

    fn text(&mut self, format: StringFormat) -> String {
        match format {
            StringFormat::PastDate => {
                let offset = self.rng.gen_range(1..=MS_PER_YEAR);
                (Utc::now() - Duration::milliseconds(offset)).to_rfc3339_opts(SecondsFormat::Millis, true)
            }
            StringFormat::Uuid => uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid().to_string(),
            StringFormat::Email => {
                let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("ada");
                let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("lovelace");
                let domain = self.domain();
                format!("{}.{}@{domain}", first.to_lowercase(), last.to_lowercase())
            }
            StringFormat::DomainName => self.domain(),
            StringFormat::Ipv4 => {
                let octets: [u8; 4] = self.rng.gen();
                std::net::Ipv4Addr::from(octets).to_string()
            }
            StringFormat::Ipv6 => {
                let segments: [u16; 8] = self.rng.gen();
                segments.iter().map(|s| format!("{s:x}")).collect::<Vec<_>>().join(":")
            }
            StringFormat::ImageUrl => format!("https://picsum.photos/seed/{}/640/480", self.word()),
            StringFormat::Url => format!("https://{}/", self.domain()),
            StringFormat::FullName => {
                let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Ada");
                let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Lovelace");
                format!("{first} {last}")
            }
            StringFormat::Slug => self.word().to_string(),
        }
    }
}

fn clamp_safe(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(-(MAX_SAFE_INTEGER as f64), MAX_SAFE_INTEGER as f64) as i64
}
