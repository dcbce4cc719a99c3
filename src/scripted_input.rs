use glam::Vec3;
use pointercast_core::Pose;
use serde::Deserialize;

/// One segment of the scripted timeline, held for `duration_ticks` ticks.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    pub duration_ticks: u64,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default = "default_forward")]
    pub forward: Vec3,
    #[serde(default)]
    pub trigger: bool,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Flip waypoint mode on the first tick of the step.
    #[serde(default)]
    pub toggle_waypoint: bool,
    /// Collider names disabled on the first tick of the step.
    #[serde(default)]
    pub disable_colliders: Vec<String>,
    /// Collider names enabled on the first tick of the step.
    #[serde(default)]
    pub enable_colliders: Vec<String>,
}

fn default_forward() -> Vec3 {
    Vec3::Z
}

fn default_active() -> bool {
    true
}

/// Per-tick input derived from the script.
#[derive(Debug, Clone)]
pub struct ScriptFrame<'a> {
    pub origin: Pose,
    pub trigger: bool,
    pub active: bool,
    /// Set only on the first tick of a step.
    pub started: Option<&'a ScriptStep>,
}

pub struct ScriptedInputPlayer {
    steps: Vec<ScriptStep>,
    index: usize,
    tick_in_step: u64,
}

impl ScriptedInputPlayer {
    pub fn new(steps: Vec<ScriptStep>) -> anyhow::Result<Self> {
        if steps.is_empty() {
            anyhow::bail!("scripted input contains no steps");
        }
        Ok(Self {
            steps,
            index: 0,
            tick_in_step: 0,
        })
    }

    /// True once the last step has run for its full duration.
    pub fn finished(&self) -> bool {
        self.index + 1 == self.steps.len()
            && self.tick_in_step >= self.steps[self.index].duration_ticks
    }

    /// Input for the next tick. The last step is held once the script runs out.
    pub fn advance(&mut self) -> ScriptFrame<'_> {
        while self.tick_in_step >= self.steps[self.index].duration_ticks
            && self.index + 1 < self.steps.len()
        {
            self.index += 1;
            self.tick_in_step = 0;
        }

        let started = self.tick_in_step == 0;
        self.tick_in_step = self.tick_in_step.saturating_add(1);

        let step = &self.steps[self.index];
        ScriptFrame {
            origin: Pose::new(step.position, step.forward),
            trigger: step.trigger,
            active: step.active,
            started: started.then_some(step),
        }
    }
}
