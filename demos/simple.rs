use fdm_wave_sim::{SimConfig, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SimConfig {
        parallel: true,
        ..SimConfig::wedge()
    };
    let mut sim = match Simulation::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    for frame in 0..600 {
        sim.step();
        if frame % 100 == 99 {
            let snap = sim.snapshot();
            info!(tick = sim.tick(),
                  t = sim.elapsed_seconds(),
                  max_abs = snap.max_abs(),
                  "frame");
        }
    }

    // coarse text rendering of the field sign, walls as '#'
    let snap = sim.snapshot();
    for y in (0..snap.height()).step_by(24) {
        let row: String = (0..snap.width())
            .step_by(8)
            .map(|x| if snap.is_wall(x, y) {
                '#'
            } else if snap.get(x, y) > 0.1 {
                '+'
            } else if snap.get(x, y) < -0.1 {
                '-'
            } else {
                '.'
            })
            .collect();
        println!("{}", row);
    }
}
