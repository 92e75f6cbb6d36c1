/*
 * Debug Information Module
 *
 * Frame metrics shown in the control panel and in the on-screen overlay:
 * - FPS (frames per second)
 * - Frame time
 * - Particle count
 * - Last pick hit and how many particles it pushed
 * - Particles recycled during the last step
 */

use std::time::Duration;

use crate::field::StepStats;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub num_particles: usize,
    pub last_step: StepStats,
}

impl DebugInfo {
    pub fn record_step(&mut self, stats: StepStats) {
        self.last_step = stats;
    }

    // Lines shown by the overlay, one metric per line
    pub fn lines(&self) -> Vec<String> {
        let hit = match self.last_step.hit {
            Some(hit) => format!(
                "Hit: #{} at ({:.2}, {:.2}, {:.2})",
                hit.index, hit.point.x, hit.point.y, hit.point.z
            ),
            None => "Hit: none".to_string(),
        };

        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Particles: {}", self.num_particles),
            hit,
            format!("Repelled: {}", self.last_step.repelled),
            format!("Recycled: {}", self.last_step.recycled),
        ]
    }
}
