use std::collections::HashSet;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use torlife::config::Config;
use torlife::coord::Coord;
use torlife::patterns;
use torlife::simulation::Simulation;
use torlife::simulation::Ticks;
use torlife::world::World;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(0x5eed)
}

fn live(world: &World) -> HashSet<Coord> {
    world.cells().iter().copied().collect()
}

fn cells(cells: &[(u16, u16)]) -> Vec<Coord> {
    cells.iter().copied().map(Coord::from).collect()
}

/// Grid and live cells agree, and no live cell is listed twice
fn assert_consistent(world: &World) {
    let listed = live(world);
    assert_eq!(listed.len(), world.cells().len(), "duplicate live cells");

    let on_grid: HashSet<_> = world.grid().live_cells().collect();
    assert_eq!(listed, on_grid);

    assert!(listed.iter().all(|&p| world.is_alive(p)));
}

#[test]
fn block_is_still() -> anyhow::Result<()> {
    let block = cells(&[(10, 10), (10, 11), (11, 10), (11, 11)]);
    let world = World::from_cells(20, block.clone())?;

    let world = world.advance(&mut rng());

    assert_eq!(world.cells(), block.as_slice());
    assert_consistent(&world);

    Ok(())
}

#[test]
fn blinker_has_period_two() -> anyhow::Result<()> {
    let mut rng = rng();
    let world = World::from_pattern(20, &patterns::BLINKER, Coord::new(5, 5))?;
    let start = live(&world);

    let world = world.advance(&mut rng);
    assert_ne!(live(&world), start);
    assert_consistent(&world);

    let world = world.advance(&mut rng);
    assert_eq!(live(&world), start);
    assert_consistent(&world);

    Ok(())
}

#[test]
fn lonely_cell_dies() -> anyhow::Result<()> {
    let world = World::from_cells(20, [Coord::new(3, 3)])?;

    let (world, report) = world.step(&mut rng());

    assert!(!report.reseeded);
    assert_eq!(report.deaths, 1);
    assert!(world.cells().is_empty());
    assert_eq!(world.grid().population(), 0);

    Ok(())
}

#[test]
fn extinct_world_reseeds() -> anyhow::Result<()> {
    for seed in 0..5 {
        let world = World::new(100)?;

        let (world, report) = world.step(&mut ChaCha8Rng::seed_from_u64(seed));

        // 10 000 cells at 1/50 gives 200 on average, with a standard deviation of 14
        let reseeded = report.survivors + report.deaths;
        assert!(report.reseeded);
        assert!(
            (100..300).contains(&reseeded),
            "reseeded {reseeded} cells"
        );
        assert_consistent(&world);
    }

    Ok(())
}

#[test]
fn populated_world_does_not_reseed() -> anyhow::Result<()> {
    let world = World::from_pattern(20, &patterns::BLOCK, Coord::new(0, 0))?;

    let (_, report) = world.step(&mut rng());

    assert!(!report.reseeded);

    Ok(())
}

#[test]
fn glider_moves_diagonally() -> anyhow::Result<()> {
    let mut rng = rng();
    let mut world = World::from_pattern(10, &patterns::GLIDER, Coord::new(0, 0))?;
    let start = live(&world);

    for _ in 0..4 {
        world = world.advance(&mut rng);
    }

    let moved: HashSet<_> = start.iter().map(|p| p.offset(1, 1, 10)).collect();
    assert_eq!(live(&world), moved);

    Ok(())
}

#[test]
fn glider_wraps_around_the_torus() -> anyhow::Result<()> {
    let mut rng = rng();
    let mut world = World::from_pattern(10, &patterns::GLIDER, Coord::new(0, 0))?;
    let start = live(&world);

    // 10 cells per axis, one cell every 4 generations
    for _ in 0..40 {
        world = world.advance(&mut rng);
        assert_consistent(&world);
    }

    assert_eq!(live(&world), start);

    Ok(())
}

#[test]
fn default_gun_emits_gliders() -> anyhow::Result<()> {
    let config = Config {
        period: Duration::ZERO,
        rng_seed: Some(1),
        ..Config::default()
    };

    let sim = Simulation::from_config(&config)?;
    assert_eq!(sim.world().population(), 36);

    let mut frames = Vec::new();
    let mut view = |cells: &[Coord]| frames.push(cells.len());

    let sim = sim.run(&mut FnRender(&mut view), &mut Ticks::new(60))?;

    assert_eq!(sim.generation(), 60);
    assert_eq!(frames[30], 41);

    let world = sim.into_world();
    assert_eq!(world.population(), 46);
    assert_consistent(&world);

    Ok(())
}

struct FnRender<'a, F: FnMut(&[Coord])>(&'a mut F);

impl<F: FnMut(&[Coord])> torlife::render::Render for FnRender<'_, F> {
    fn render(&mut self, cells: &[Coord]) -> anyhow::Result<()> {
        (self.0)(cells);
        Ok(())
    }
}
