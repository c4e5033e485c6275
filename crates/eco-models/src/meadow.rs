//! World schema and team wiring for the meadow.

use eco_agent::Observer;
use eco_core::{FieldId, Month, SimRng};
use eco_sim::SimBuilder;
use eco_world::{SharedWorld, WorldBuilder};

use crate::{EcologyParams, Foxes, InitialState, ModelResult, Rabbits, RyeGrass, Weather};

/// Seed offset of the setup stream that samples month 0's weather.
const OPENING_WEATHER_STREAM: u64 = 0x5EED_0000_0000_0001;

/// Field ids of the predator block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PredatorFields {
    pub foxes:  FieldId,
    /// Rabbits caught in the last tick.  Read by `Rabbits` and `Foxes` one
    /// tick after it is written.
    pub hunted: FieldId,
}

/// Field ids of every meadow variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MeadowFields {
    pub temp:      FieldId,
    pub precip:    FieldId,
    pub height:    FieldId,
    pub rabbits:   FieldId,
    pub predators: Option<PredatorFields>,
}

/// The meadow ecosystem: its field ids and parameters.
///
/// ```rust,ignore
/// let (world, meadow) = Meadow::world(&initial, &params, seed)?;
/// let config = SimConfig { team_size: meadow.team(), ..config };
/// let report = meadow
///     .register(SimBuilder::new(config, world, LogObserver::new()))
///     .build()?
///     .run()?;
/// ```
#[derive(Clone, Debug)]
pub struct Meadow {
    pub fields: MeadowFields,
    params:     EcologyParams,
}

impl Meadow {
    /// Team size for a meadow with or without foxes: one member per
    /// ecological agent plus the watcher.
    pub fn team_size(with_predators: bool) -> usize {
        if with_predators { 5 } else { 4 }
    }

    /// Validate the inputs and build the shared world at month 0.
    ///
    /// Month 0's weather is drawn from a setup stream of `seed`, so it is
    /// reproducible and independent of the agents' own streams.
    pub fn world(
        initial: &InitialState,
        params:  &EcologyParams,
        seed:    u64,
    ) -> ModelResult<(SharedWorld, Meadow)> {
        params.validate()?;
        initial.validate(params)?;

        let mut rng = SimRng::new(seed).child(OPENING_WEATHER_STREAM);
        let (temp, precip) = Weather::sample(params, Month::ZERO, &mut rng);

        let mut b = WorldBuilder::new();
        let temp = b.add_float("temp", temp)?;
        let precip = b.add_float("precip", precip)?;
        let height = b.add_float("height", initial.height)?;
        let rabbits = b.add_count("rabbits", initial.rabbits)?;
        let predators = if initial.predators {
            Some(PredatorFields {
                foxes:  b.add_count("foxes", initial.foxes)?,
                hunted: b.add_count("hunted", 0)?,
            })
        } else {
            None
        };

        let meadow = Meadow {
            fields: MeadowFields { temp, precip, height, rabbits, predators },
            params: params.clone(),
        };
        Ok((b.build(), meadow))
    }

    /// Members this meadow registers, watcher included.
    pub fn team(&self) -> usize {
        Self::team_size(self.fields.predators.is_some())
    }

    pub fn params(&self) -> &EcologyParams {
        &self.params
    }

    /// Register the agents in a fixed order: weather, grass, rabbits, then
    /// foxes when present.  The builder appends the watcher after them.
    pub fn register<O: Observer>(&self, builder: SimBuilder<O>) -> SimBuilder<O> {
        let f = self.fields;
        let p = &self.params;
        let builder = builder
            .agent(Weather::new(f.temp, f.precip, p.clone()))
            .agent(RyeGrass::new(f.height, f.temp, f.precip, f.rabbits, p.clone()))
            .agent(Rabbits::new(f.rabbits, f.height, f.predators.map(|x| x.hunted)));
        match f.predators {
            Some(x) => builder.agent(Foxes::new(x.foxes, x.hunted, f.rabbits, p.clone())),
            None    => builder,
        }
    }
}
