use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use globe_core::{
    DetectionError, FactQuery, FrameLoop, Globe, Hand, LandmarkSource, LoopControl,
    PointerReader, TickOutcome, GLOBE_RADIUS, HAND_LANDMARK_COUNT, INDEX_TIP, THUMB_TIP,
};
use glam::{Vec2, Vec3};
use rand::prelude::*;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const STATUS_INTERVAL: Duration = Duration::from_millis(250);

/// One segment of the replayed gesture. Times are seconds from start.
#[derive(Clone, Copy, Debug)]
enum Segment {
    Absent,
    Open { at: Vec2 },
    Pinch { from: Vec2, to: Vec2 },
    Failure,
}

const SCRIPT: &[(f64, f64, Segment)] = &[
    (0.0, 0.5, Segment::Absent),
    (0.5, 1.0, Segment::Open { at: Vec2::new(0.6, 0.5) }),
    (
        1.0,
        2.5,
        Segment::Pinch {
            from: Vec2::new(0.6, 0.5),
            to: Vec2::new(0.35, 0.5),
        },
    ),
    (2.5, 3.0, Segment::Open { at: Vec2::new(0.35, 0.5) }),
    (3.0, 3.2, Segment::Failure),
    (
        3.2,
        4.5,
        Segment::Pinch {
            from: Vec2::new(0.5, 0.35),
            to: Vec2::new(0.5, 0.6),
        },
    ),
    (4.5, 6.0, Segment::Absent),
];

/// Synthetic detector: follows `SCRIPT` with a little per-frame jitter.
struct ScriptedHand {
    start_ms: Option<f64>,
    rng: StdRng,
    jitter: f32,
}

impl ScriptedHand {
    fn new(seed: u64) -> Self {
        Self {
            start_ms: None,
            rng: StdRng::seed_from_u64(seed),
            jitter: 0.004,
        }
    }

    fn duration_sec() -> f64 {
        SCRIPT.last().map_or(0.0, |s| s.1)
    }

    fn segment_at(t: f64) -> Option<(f64, f64, Segment)> {
        SCRIPT.iter().copied().find(|(t0, t1, _)| t >= *t0 && t < *t1)
    }

    fn hand_at(&mut self, index_tip: Vec2, pinch_gap: f32) -> Result<Hand, DetectionError> {
        let noise = Vec2::new(
            self.rng.gen_range(-self.jitter..=self.jitter),
            self.rng.gen_range(-self.jitter..=self.jitter),
        );
        let tip = index_tip + noise;
        let wrist = tip + Vec2::new(0.05, 0.25);
        let mut flat = Vec::with_capacity(HAND_LANDMARK_COUNT * 3);
        for i in 0..HAND_LANDMARK_COUNT {
            let p = match i {
                INDEX_TIP => tip,
                THUMB_TIP => tip + Vec2::new(pinch_gap, 0.02),
                _ => wrist.lerp(tip, i as f32 / HAND_LANDMARK_COUNT as f32),
            };
            flat.extend_from_slice(&[p.x, p.y, 0.0]);
        }
        Hand::from_flat(&flat)
    }
}

impl LandmarkSource for ScriptedHand {
    fn detect(&mut self, timestamp_ms: f64) -> Result<Option<Hand>, DetectionError> {
        let start = *self.start_ms.get_or_insert(timestamp_ms);
        let t = (timestamp_ms - start) / 1000.0;
        let Some((t0, t1, segment)) = Self::segment_at(t) else {
            return Ok(None);
        };
        let k = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0) as f32;
        match segment {
            Segment::Absent => Ok(None),
            Segment::Failure => Err(DetectionError::Source("simulated detector fault".into())),
            Segment::Open { at } => self.hand_at(at, 0.2).map(Some),
            Segment::Pinch { from, to } => self.hand_at(from.lerp(to, k), 0.03).map(Some),
        }
    }
}

fn spawn_status_reader(pointer: PointerReader, done: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !done.load(Ordering::SeqCst) {
            let p = pointer.snapshot();
            log::info!(
                "[status] pointer=({:.3},{:.3}) {}",
                p.x,
                p.y,
                if p.active { "pinching" } else { "open" }
            );
            thread::sleep(STATUS_INTERVAL);
        }
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut globe = Globe::default();
    let control = LoopControl::new();
    let mut frame_loop = FrameLoop::new(control.clone());
    let mut source = ScriptedHand::new(42);

    let done = Arc::new(AtomicBool::new(false));
    let status = spawn_status_reader(globe.pointer_reader(), Arc::clone(&done));

    let start = Instant::now();
    let script_end = Duration::from_secs_f64(ScriptedHand::duration_sec());
    control.start();
    let mut frames = 0u32;
    loop {
        let now = start.elapsed();
        if now >= script_end {
            control.stop();
        }
        match frame_loop.tick(now.as_secs_f64() * 1000.0, &mut source, &mut globe) {
            TickOutcome::Continue(report) => {
                frames += 1;
                if let Some(d) = report.delta.filter(|d| *d != Vec2::ZERO) {
                    log::debug!("[gesture] delta=({:.4},{:.4})", d.x, d.y);
                }
            }
            TickOutcome::Stopped => break,
        }
        thread::sleep(FRAME_INTERVAL);
    }

    done.store(true, Ordering::SeqCst);
    if status.join().is_err() {
        log::warn!("[status] reader thread panicked");
    }

    let o = globe.orientation();
    log::info!(
        "[loop] {} frames, yaw={:.3} pitch={:.3} clouds={:.3}",
        frames,
        o.yaw,
        o.pitch,
        globe.rotation().cloud_yaw()
    );

    // Pick whatever now faces the camera.
    let facing = Vec3::new(0.0, 0.0, GLOBE_RADIUS);
    match globe.pick_world(facing) {
        Ok(coord) => log::info!("[facts] would query: {}", FactQuery::Location(coord).label()),
        Err(e) => log::warn!("[pick] {}", e),
    }
    Ok(())
}
