//! Generation controller.
//!
//! A [`Session`] owns the catalogs and all long-lived sampling state: the
//! seeded RNG, the key cycler and one mode scheduler per scheduled
//! archetype. Each [`Session::generate`] call runs up to
//! `max_attempts` attempts of
//! assemble → transpose → snap → correct → validate
//! and either returns a valid phrase or fails with
//! [`GenerateError::AttemptsExhausted`].

use std::collections::BTreeMap;

use rand::Rng;
use rand_pcg::Pcg32;
use riffweave_catalog::{Catalog, CatalogSet};
use riffweave_theory::{note_name, Key, Note};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::archetype::{
    resolve_substitute, transposition_stages, Archetype, ArchetypeDef, ChainBase, Plan,
    Transposition, DECEPTIVE_SUBSTITUTES,
};
use crate::assemble::{Assembled, Assembler, Lanes};
use crate::config::{GenerationConfig, RegisterBounds};
use crate::cycler::Cycler;
use crate::error::{AttemptFailure, GenerateError};
use crate::post;
use crate::rng::{create_rng, derive_stream_seed};
use crate::scheduler::{FormTag, ModeScheduler};

/// A successfully generated phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPhrase {
    pub archetype: Archetype,
    pub key: Key,
    pub notes: Vec<Note>,
    /// Attempts used, including the successful one.
    pub attempts: u32,
    /// Form used by scheduled archetypes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormTag>,
}

impl GeneratedPhrase {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Note names spelled in the key's sharp/flat convention.
    pub fn names(&self) -> Vec<String> {
        self.notes.iter().map(|n| note_name(*n, self.key)).collect()
    }
}

/// Long-lived generation state.
pub struct Session {
    catalogs: CatalogSet,
    config: GenerationConfig,
    rng: Pcg32,
    keys: Option<Cycler>,
    schedulers: BTreeMap<Archetype, ModeScheduler>,
    substitutes: Vec<(Key, Key)>,
}

impl Session {
    /// A session over `catalogs`, seeded from `config.seed`.
    pub fn new(catalogs: CatalogSet, config: GenerationConfig) -> Self {
        let rng = create_rng(derive_stream_seed(config.seed, "session"));
        Self {
            catalogs,
            config,
            rng,
            keys: None,
            schedulers: BTreeMap::new(),
            substitutes: DECEPTIVE_SUBSTITUTES.to_vec(),
        }
    }

    /// Replaces the deceptive substitute-key table.
    pub fn with_substitutes(mut self, table: Vec<(Key, Key)>) -> Self {
        self.substitutes = table;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    /// Generates from string identifiers.
    ///
    /// An unknown archetype or key fails immediately.
    pub fn generate_named(
        &mut self,
        archetype: &str,
        key: Option<&str>,
    ) -> Result<GeneratedPhrase, GenerateError> {
        let archetype: Archetype = archetype.parse()?;
        let key = key
            .map(|k| {
                k.parse::<Key>()
                    .map_err(|_| GenerateError::UnknownKey(k.to_string()))
            })
            .transpose()?;
        self.generate(archetype, key)
    }

    /// Generates one phrase for `archetype`, in `key` or the next key from
    /// the session's key cycler.
    ///
    /// A cycled key is only consumed once the up-front checks (substitute
    /// mapping, required catalogs) pass, so a call that fails immediately
    /// leaves the key round untouched.
    pub fn generate(
        &mut self,
        archetype: Archetype,
        key: Option<Key>,
    ) -> Result<GeneratedPhrase, GenerateError> {
        let def = archetype.def();
        let cycled = key.is_none();
        let key = match key {
            Some(key) => key,
            None => self.peek_key(),
        };

        let substitute = match def.transposition {
            Transposition::Substitute => Some(resolve_substitute(&self.substitutes, key).ok_or(
                GenerateError::MissingSubstituteKey {
                    archetype: archetype.id().to_string(),
                    key,
                },
            )?),
            _ => None,
        };

        for role in archetype.required_roles() {
            self.catalogs.get(role)?;
        }
        self.ensure_scheduler(archetype)?;
        if cycled {
            self.next_key();
        }

        let stages = transposition_stages(def.transposition, key, substitute);
        debug!(%archetype, %key, ?stages, "generation started");

        let Session {
            catalogs,
            config,
            rng,
            schedulers,
            ..
        } = self;
        let catalogs: &CatalogSet = catalogs;
        let pool = def.cadence_pool.map(|role| catalogs.get(role)).transpose()?;
        let mut lanes = Lanes::new();

        for attempt in 1..=config.max_attempts {
            let outcome = run_attempt(
                catalogs,
                rng,
                &mut lanes,
                schedulers.get_mut(&archetype),
                def,
                &stages,
                pool,
                config.register,
            );

            match outcome {
                Ok(Assembled { notes, form }) => {
                    if form.is_some() {
                        if let Some(scheduler) = schedulers.get_mut(&archetype) {
                            scheduler.advance();
                        }
                    }
                    info!(%archetype, %key, attempts = attempt, "phrase generated");
                    return Ok(GeneratedPhrase {
                        archetype,
                        key,
                        notes,
                        attempts: attempt,
                        form,
                    });
                }
                Err(failure) => {
                    debug!(%archetype, %key, attempt, %failure, "attempt failed");
                    if let Some(lane) = def.reset {
                        lanes.reset(lane);
                    }
                }
            }
        }

        warn!(%archetype, %key, attempts = config.max_attempts, "attempt budget exhausted");
        Err(GenerateError::AttemptsExhausted {
            archetype: archetype.id().to_string(),
            key,
            attempts: config.max_attempts,
        })
    }

    fn peek_key(&mut self) -> Key {
        let cycler = self
            .keys
            .get_or_insert_with(|| Cycler::new(Key::ALL.len()));
        cycler
            .peek_index(&mut self.rng)
            .map_or(Key::C, |index| Key::ALL[index])
    }

    fn next_key(&mut self) -> Key {
        let cycler = self
            .keys
            .get_or_insert_with(|| Cycler::new(Key::ALL.len()));
        cycler
            .next_index(&mut self.rng)
            .map_or(Key::C, |index| Key::ALL[index])
    }

    /// Creates the archetype's mode scheduler on first use.
    fn ensure_scheduler(&mut self, archetype: Archetype) -> Result<(), GenerateError> {
        let Plan::Chain {
            base: ChainBase::Scheduled(base),
            ..
        } = archetype.def().plan
        else {
            return Ok(());
        };
        if self.schedulers.contains_key(&archetype) {
            return Ok(());
        }

        let short_len = self.catalogs.get(base.short_role)?.len();
        let long_len = self.catalogs.get(base.long_role)?.len();
        self.schedulers.insert(
            archetype,
            ModeScheduler::new(base.short_role, short_len, base.long_role, long_len),
        );
        Ok(())
    }
}

/// One attempt: assemble, then post-process and validate.
#[allow(clippy::too_many_arguments)]
fn run_attempt<R: Rng + ?Sized>(
    catalogs: &CatalogSet,
    rng: &mut R,
    lanes: &mut Lanes,
    scheduler: Option<&mut ModeScheduler>,
    def: &ArchetypeDef,
    stages: &[i32],
    pool: Option<&Catalog>,
    register: RegisterBounds,
) -> Result<Assembled, AttemptFailure> {
    let assembled = Assembler::new(catalogs, rng, lanes, scheduler).assemble(&def.plan)?;

    let shift: i32 = stages.iter().sum();
    let mut notes = post::transpose(&assembled.notes, stages);
    if let Some(pool) = pool {
        notes = post::snap_cadence(&notes, pool, shift);
    }
    notes = post::correct_register(&notes, register);

    if !def.accepted_lengths.contains(&notes.len()) {
        return Err(AttemptFailure::LengthMismatch {
            expected: def.accepted_lengths,
            actual: notes.len(),
        });
    }
    if let Some(note) = post::first_out_of_range(&notes, register) {
        return Err(AttemptFailure::OutOfRange {
            pitch: note.absolute_pitch(),
            low: register.low,
            high: register.high,
        });
    }

    Ok(Assembled {
        notes,
        form: assembled.form,
    })
}
