//! Spawn scheduling
//!
//! Owns every live entity. Frogs and power-ups run on independent
//! cadences, each with its own "next spawn due" timestamp on the sim clock.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultySnapshot;
use super::entity::{Entity, EntityRef};
use super::frog::{Frog, FrogKind};
use super::powerup::{PowerUp, PowerUpEffects, PowerUpKind};
use super::session::SessionContext;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Game area size in pixels
    area: Vec2,
    /// Inset keeping spawns fully on screen
    padding: f32,
    frogs: Vec<Frog>,
    power_ups: Vec<PowerUp>,
    next_frog_spawn: f64,
    next_power_up_spawn: f64,
    next_id: u32,
}

impl SpawnScheduler {
    pub fn new(area: Vec2, padding: f32) -> Self {
        let mut scheduler = Self {
            area,
            padding,
            frogs: Vec::new(),
            power_ups: Vec::new(),
            next_frog_spawn: 0.0,
            next_power_up_spawn: 0.0,
            next_id: 1,
        };
        scheduler.reset(0.0);
        scheduler
    }

    /// Drop every entity and restart both cadences from `now`
    pub fn reset(&mut self, now: f64) {
        self.frogs.clear();
        self.power_ups.clear();
        self.next_frog_spawn = now + FROG_INITIAL_DELAY;
        self.next_power_up_spawn = now + POWERUP_SPAWN_INTERVAL;
    }

    /// One scheduler step: advance entities, sweep the dead, then give each
    /// cadence a single chance to fire
    pub fn update<R: Rng + ?Sized>(&mut self, ctx: &mut SessionContext<'_>, rng: &mut R) {
        for frog in &mut self.frogs {
            frog.update(ctx);
        }
        for power_up in &mut self.power_ups {
            power_up.update(ctx.now);
        }
        self.frogs.retain(|f| f.is_live());
        self.power_ups.retain(|p| p.is_live());

        if !ctx.session.is_playing {
            return;
        }

        if ctx.now >= self.next_frog_spawn {
            let kind = FrogKind::from_roll(rng.random::<f64>());
            let pos = self.random_position(rng);
            self.spawn_frog(kind, pos, ctx.now, ctx.effects, &ctx.difficulty);
            self.next_frog_spawn =
                ctx.now + Self::next_frog_interval(rng, ctx.effects, &ctx.difficulty);
        }

        if ctx.now >= self.next_power_up_spawn {
            let kind = Self::random_power_up_kind(rng);
            let pos = self.random_position(rng);
            self.spawn_power_up(kind, pos, ctx.now);
            self.next_power_up_spawn = ctx.now + POWERUP_SPAWN_INTERVAL;
        }
    }

    /// Each power-up kind is equally likely
    pub fn random_power_up_kind<R: Rng + ?Sized>(rng: &mut R) -> PowerUpKind {
        PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())]
    }

    /// Seconds until the next frog: uniform base, stretched by slow motion,
    /// then shortened by difficulty
    pub fn next_frog_interval<R: Rng + ?Sized>(
        rng: &mut R,
        effects: &PowerUpEffects,
        difficulty: &DifficultySnapshot,
    ) -> f64 {
        let base = FROG_MIN_SPAWN_INTERVAL
            + rng.random::<f32>() * (FROG_MAX_SPAWN_INTERVAL - FROG_MIN_SPAWN_INTERVAL);
        let slowed = effects.apply_time_multiplier(base as f64) as f32;
        difficulty.spawn_interval_scale(slowed) as f64
    }

    /// Uniform point inside the padded game area
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            Self::random_axis(rng, self.area.x, self.padding),
            Self::random_axis(rng, self.area.y, self.padding),
        )
    }

    fn random_axis<R: Rng + ?Sized>(rng: &mut R, extent: f32, padding: f32) -> f32 {
        let (lo, hi) = (padding, extent - padding);
        if hi > lo {
            rng.random_range(lo..hi)
        } else {
            // Area too small for the padding; fall back to the centre line
            extent / 2.0
        }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Lowest console digit not held by a live entity
    fn free_label(&self) -> Option<u8> {
        let taken = |n: u8| {
            self.frogs
                .iter()
                .filter(|f| f.is_live())
                .any(|f| f.label == Some(n))
                || self
                    .power_ups
                    .iter()
                    .filter(|p| p.is_live())
                    .any(|p| p.label == Some(n))
        };
        (1..=MAX_LABEL).find(|&n| !taken(n))
    }

    pub fn spawn_frog(
        &mut self,
        kind: FrogKind,
        pos: Vec2,
        now: f64,
        effects: &PowerUpEffects,
        difficulty: &DifficultySnapshot,
    ) -> u32 {
        let id = self.allocate_id();
        let mut frog = Frog::new(id, kind, pos, now, effects, difficulty);
        frog.label = self.free_label();
        log::debug!(
            "Spawned {} frog {} at ({:.0}, {:.0}), lifetime {:.2}s",
            kind.as_str(),
            id,
            pos.x,
            pos.y,
            frog.lifetime
        );
        self.frogs.push(frog);
        id
    }

    pub fn spawn_power_up(&mut self, kind: PowerUpKind, pos: Vec2, now: f64) -> u32 {
        let id = self.allocate_id();
        let mut power_up = PowerUp::new(id, kind, pos, now);
        power_up.label = self.free_label();
        log::debug!("Spawned power-up {} ({})", id, kind.as_str());
        self.power_ups.push(power_up);
        id
    }

    /// First live entity under `point`, power-ups checked before frogs
    pub fn entity_at(&self, point: Vec2) -> Option<EntityRef> {
        self.power_ups
            .iter()
            .find(|p| p.contains(point))
            .map(|p| EntityRef::PowerUp(p.id))
            .or_else(|| {
                self.frogs
                    .iter()
                    .find(|f| f.contains(point))
                    .map(|f| EntityRef::Frog(f.id))
            })
    }

    /// Live entity carrying a console digit
    pub fn entity_by_label(&self, label: u8) -> Option<EntityRef> {
        self.power_ups
            .iter()
            .find(|p| p.is_live() && p.label == Some(label))
            .map(|p| EntityRef::PowerUp(p.id))
            .or_else(|| {
                self.frogs
                    .iter()
                    .find(|f| f.is_live() && f.label == Some(label))
                    .map(|f| EntityRef::Frog(f.id))
            })
    }

    /// Eliminate or collect the target. False if it no longer reacts.
    pub fn hit(&mut self, target: EntityRef, ctx: &mut SessionContext<'_>) -> bool {
        match target {
            EntityRef::Frog(id) => self
                .frogs
                .iter_mut()
                .find(|f| f.id == id)
                .is_some_and(|f| f.eliminate(ctx).is_some()),
            EntityRef::PowerUp(id) => self
                .power_ups
                .iter_mut()
                .find(|p| p.id == id)
                .is_some_and(|p| p.collect(ctx)),
        }
    }

    pub fn frogs(&self) -> &[Frog] {
        &self.frogs
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn frog(&self, id: u32) -> Option<&Frog> {
        self.frogs.iter().find(|f| f.id == id)
    }

    pub fn power_up(&self, id: u32) -> Option<&PowerUp> {
        self.power_ups.iter().find(|p| p.id == id)
    }

    pub fn next_frog_spawn(&self) -> f64 {
        self.next_frog_spawn
    }

    pub fn next_power_up_spawn(&self) -> f64 {
        self.next_power_up_spawn
    }

    pub fn area(&self) -> Vec2 {
        self.area
    }
}
