//! 呼吸练习计时
//!
//! 两个互不同步的计时器驱动这里的状态：每秒一次的倒计时，和每 4 秒一次的呼吸步骤。
//! 计时器本身由界面层持有，这里只负责状态转换。

use myndfull_shared::date::format_clock;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 15;
pub const DEFAULT_MINUTES: u32 = 5;

/// 每个呼吸步骤持续的秒数
pub const STEP_SECONDS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathStep {
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
}

pub const STEPS: [BreathStep; 4] = [
    BreathStep::Inhale,
    BreathStep::HoldIn,
    BreathStep::Exhale,
    BreathStep::HoldOut,
];

impl BreathStep {
    pub fn label(&self) -> &'static str {
        match self {
            BreathStep::Inhale => "Inhale",
            BreathStep::HoldIn | BreathStep::HoldOut => "Hold",
            BreathStep::Exhale => "Exhale",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            BreathStep::Inhale => "Breathe in slowly...",
            BreathStep::HoldIn => "Hold your breath...",
            BreathStep::Exhale => "Release slowly...",
            BreathStep::HoldOut => "Keep lungs empty...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreathingSession {
    minutes: u32,
    remaining: u32,
    step: usize,
    running: bool,
}

impl Default for BreathingSession {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_MINUTES,
            remaining: DEFAULT_MINUTES * 60,
            step: 0,
            running: false,
        }
    }
}

impl BreathingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// 运行中不能修改时长
    pub fn set_minutes(&mut self, minutes: u32) {
        if self.running {
            return;
        }
        self.minutes = minutes.clamp(MIN_MINUTES, MAX_MINUTES);
        self.remaining = self.minutes * 60;
    }

    pub fn start(&mut self) {
        self.remaining = self.minutes * 60;
        self.step = 0;
        self.running = true;
        tracing::debug!(minutes = self.minutes, "breathing session started");
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.step = 0;
    }

    /// 倒计时一秒，归零时结束并返回 `true`
    pub fn tick_second(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stop();
            return true;
        }
        false
    }

    pub fn tick_step(&mut self) {
        if self.running {
            self.step = (self.step + 1) % STEPS.len();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn step(&self) -> BreathStep {
        STEPS[self.step]
    }

    /// `m:ss`
    pub fn clock(&self) -> String {
        format_clock(self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_minute_takes_sixty_ticks() {
        let mut session = BreathingSession::new();
        session.set_minutes(1);
        session.start();
        assert_eq!(session.clock(), "1:00");

        let mut ticks = 0;
        while session.is_running() {
            ticks += 1;
            let done = session.tick_second();
            assert_eq!(done, ticks == 60);
        }
        assert_eq!(ticks, 60);
        assert_eq!(session.remaining(), 0);
        assert_eq!(session.step_index(), 0);
    }

    #[test]
    fn steps_cycle_every_four_seconds() {
        let mut session = BreathingSession::new();
        session.set_minutes(1);
        session.start();

        let mut seen = Vec::new();
        for second in 1..=20 {
            session.tick_second();
            if second % STEP_SECONDS == 0 {
                session.tick_step();
                seen.push(session.step_index());
            }
        }
        assert_eq!(seen, [1, 2, 3, 0, 1]);
        assert_eq!(session.remaining(), 40);
        assert_eq!(session.step(), BreathStep::HoldIn);
    }

    #[test]
    fn stop_resets_step() {
        let mut session = BreathingSession::new();
        session.start();
        session.tick_step();
        session.tick_step();
        assert_eq!(session.step().instruction(), "Release slowly...");

        session.stop();
        assert!(!session.is_running());
        assert_eq!(session.step(), BreathStep::Inhale);
        session.tick_second();
        assert_eq!(session.clock(), "5:00");
    }

    #[test]
    fn duration_is_clamped_and_locked_while_running() {
        let mut session = BreathingSession::new();
        session.set_minutes(40);
        assert_eq!(session.minutes(), MAX_MINUTES);
        session.set_minutes(0);
        assert_eq!(session.minutes(), MIN_MINUTES);

        session.start();
        session.set_minutes(10);
        assert_eq!(session.minutes(), MIN_MINUTES);
    }
}
