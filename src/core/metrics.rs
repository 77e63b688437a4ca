/// Dashboard load gauges
///
/// Nothing is measured. On every tick each gauge of every server moves by a
/// random delta and is clamped back into its range. The RNG is a type
/// parameter so tests can run with a seeded generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use crate::core::server::Server;
use crate::utils::constants::SEED_GAUGES;

/// Samples of the average CPU kept for the sparkline
const HISTORY_LEN: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gauge {
    Cpu,
    Ram,
    Network,
    Disk,
}

impl Gauge {
    pub const ALL: [Gauge; 4] = [Gauge::Cpu, Gauge::Ram, Gauge::Network, Gauge::Disk];

    pub fn label(&self) -> &'static str {
        match self {
            Gauge::Cpu => "CPU",
            Gauge::Ram => "RAM",
            Gauge::Network => "Network",
            Gauge::Disk => "Disk",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Gauge::Network => "Mbps",
            _ => "%",
        }
    }

    /// Inclusive clamp range
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Gauge::Network => (0.0, 1000.0),
            _ => (0.0, 100.0),
        }
    }

    /// Largest change a single tick may apply
    pub fn max_delta(&self) -> f64 {
        match self {
            Gauge::Cpu => 10.0,
            Gauge::Ram => 5.0,
            Gauge::Network => 50.0,
            Gauge::Disk => 2.0,
        }
    }

    /// Value as a 0..=1 fraction of the range, for gauge widgets
    pub fn ratio(&self, value: f64) -> f64 {
        let (min, max) = self.bounds();
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerGauges {
    pub server_id: String,
    pub name: String,
    pub cpu: f64,
    pub ram: f64,
    pub network: f64,
    pub disk: f64,
}

impl ServerGauges {
    pub fn get(&self, gauge: Gauge) -> f64 {
        match gauge {
            Gauge::Cpu => self.cpu,
            Gauge::Ram => self.ram,
            Gauge::Network => self.network,
            Gauge::Disk => self.disk,
        }
    }

    fn slot(&mut self, gauge: Gauge) -> &mut f64 {
        match gauge {
            Gauge::Cpu => &mut self.cpu,
            Gauge::Ram => &mut self.ram,
            Gauge::Network => &mut self.network,
            Gauge::Disk => &mut self.disk,
        }
    }
}

/// Mean of every gauge across all servers
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Averages {
    pub cpu: f64,
    pub ram: f64,
    pub network: f64,
    pub disk: f64,
}

impl Averages {
    pub fn get(&self, gauge: Gauge) -> f64 {
        match gauge {
            Gauge::Cpu => self.cpu,
            Gauge::Ram => self.ram,
            Gauge::Network => self.network,
            Gauge::Disk => self.disk,
        }
    }
}

pub struct MetricJitter<R: Rng = StdRng> {
    servers: Vec<ServerGauges>,
    rng: R,
    paused: bool,
    ticks: u64,
    cpu_history: VecDeque<u64>,
}

impl MetricJitter<StdRng> {
    pub fn new(servers: &[Server]) -> Self {
        Self::with_rng(servers, StdRng::from_entropy())
    }
}

impl<R: Rng> MetricJitter<R> {
    pub fn with_rng(servers: &[Server], rng: R) -> Self {
        let servers = servers
            .iter()
            .map(|server| {
                let seed = SEED_GAUGES.iter().find(|(id, ..)| *id == server.id);
                let (cpu, ram, network, disk) = seed
                    .map(|(_, cpu, ram, network, disk)| (*cpu, *ram, *network, *disk))
                    .unwrap_or((0.0, 0.0, 0.0, 0.0));
                ServerGauges {
                    server_id: server.id.clone(),
                    name: server.name.clone(),
                    cpu,
                    ram,
                    network,
                    disk,
                }
            })
            .collect();

        let mut jitter = Self {
            servers,
            rng,
            paused: false,
            ticks: 0,
            cpu_history: VecDeque::with_capacity(HISTORY_LEN),
        };
        jitter.record();
        jitter
    }

    pub fn servers(&self) -> &[ServerGauges] {
        &self.servers
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn cpu_history(&self) -> Vec<u64> {
        self.cpu_history.iter().copied().collect()
    }

    /// Perturb every gauge once; does nothing while paused
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }

        for server in &mut self.servers {
            for gauge in Gauge::ALL {
                let max_delta = gauge.max_delta();
                let delta = self.rng.gen_range(-max_delta..=max_delta);
                let (min, max) = gauge.bounds();
                let slot = server.slot(gauge);
                *slot = (*slot + delta).clamp(min, max);
            }
        }

        self.ticks += 1;
        self.record();
        true
    }

    pub fn averages(&self) -> Averages {
        if self.servers.is_empty() {
            return Averages::default();
        }

        let n = self.servers.len() as f64;
        let mean = |gauge: Gauge| self.servers.iter().map(|s| s.get(gauge)).sum::<f64>() / n;
        Averages {
            cpu: mean(Gauge::Cpu),
            ram: mean(Gauge::Ram),
            network: mean(Gauge::Network),
            disk: mean(Gauge::Disk),
        }
    }

    fn record(&mut self) {
        if self.cpu_history.len() == HISTORY_LEN {
            self.cpu_history.pop_front();
        }
        let cpu = self.averages().cpu.round() as u64;
        self.cpu_history.push_back(cpu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::server::catalog;

    fn seeded(seed: u64) -> MetricJitter<StdRng> {
        MetricJitter::with_rng(&catalog(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_gauges_stay_in_bounds() {
        let mut jitter = seeded(7);
        for _ in 0..5_000 {
            jitter.tick();
            for server in jitter.servers() {
                for gauge in Gauge::ALL {
                    let (min, max) = gauge.bounds();
                    let value = server.get(gauge);
                    assert!(value >= min && value <= max, "{} {} = {}", server.name, gauge.label(), value);
                }
            }
        }
        assert_eq!(jitter.ticks(), 5_000);
    }

    #[test]
    fn test_tick_delta_is_bounded() {
        let mut jitter = seeded(42);
        let before = jitter.servers().to_vec();
        jitter.tick();

        for (old, new) in before.iter().zip(jitter.servers()) {
            for gauge in Gauge::ALL {
                assert!((new.get(gauge) - old.get(gauge)).abs() <= gauge.max_delta() + f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = seeded(1);
        let mut b = seeded(1);
        for _ in 0..10 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.servers(), b.servers());
    }

    #[test]
    fn test_averages_are_means() {
        let jitter = seeded(3);
        let averages = jitter.averages();
        assert!((averages.cpu - (45.0 + 12.0 + 5.0) / 3.0).abs() < 1e-9);
        assert!((averages.network - (340.0 + 45.0 + 10.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_pause_freezes_gauges() {
        let mut jitter = seeded(9);
        assert!(jitter.toggle_pause());
        let before = jitter.servers().to_vec();
        assert!(!jitter.tick());
        assert_eq!(jitter.servers(), &before[..]);
        assert_eq!(jitter.ticks(), 0);
    }

    #[test]
    fn test_cpu_history_is_capped() {
        let mut jitter = seeded(5);
        for _ in 0..(HISTORY_LEN * 2) {
            jitter.tick();
        }
        assert_eq!(jitter.cpu_history().len(), HISTORY_LEN);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(Gauge::Network.ratio(500.0), 0.5);
        assert_eq!(Gauge::Cpu.ratio(150.0), 1.0);
    }
}
