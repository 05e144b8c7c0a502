use gridstar_core::{Grid, Point, Role, Topology};
use gridstar_paths::{
    path_cost, refresh_all, Marker, SearchEngine, SearchError, SearchState, DIAGONAL_COST,
};

fn search(grid: &mut Grid, topology: Topology) -> SearchEngine {
    refresh_all(grid, topology);
    let mut engine = SearchEngine::new();
    engine.initialize_marked(grid, topology).unwrap();
    engine.run_to_completion(grid).unwrap();
    engine
}

fn full_path(grid: &Grid, engine: &SearchEngine) -> Vec<Point> {
    let mut full = vec![grid.start().unwrap()];
    full.extend_from_slice(engine.path().unwrap());
    full
}

#[test]
fn five_by_five_both_topologies() {
    let mut grid = Grid::new(5);
    grid.set_role(Point::new(0, 0), Role::Start).unwrap();
    grid.set_role(Point::new(4, 4), Role::End).unwrap();

    let four = search(&mut grid, Topology::FourDirectional);
    assert_eq!(four.state(), SearchState::Found);
    assert_eq!(four.path_cost(), Some(8.0));
    let path = full_path(&grid, &four);
    assert_eq!(path.len(), 9);
    assert!(path.windows(2).all(|w| w[1].row + w[1].col > w[0].row + w[0].col));

    let eight = search(&mut grid, Topology::EightDirectional);
    assert_eq!(eight.state(), SearchState::Found);
    assert!((eight.path_cost().unwrap() - 4.0 * DIAGONAL_COST).abs() < 1e-9);
    let path = full_path(&grid, &eight);
    assert_eq!(path, (0..5).map(|i| Point::new(i, i)).collect::<Vec<_>>());
}

#[test]
fn detour_around_wall() {
    let mut grid = Grid::from_ascii(
        "S......
         ######.
         .......
         .######
         ......E
         .......
         .......",
    )
    .unwrap();
    let engine = search(&mut grid, Topology::FourDirectional);
    assert_eq!(engine.state(), SearchState::Found);
    // 6 right, 2 down, 6 left, 2 down, 6 right
    assert_eq!(engine.path_cost(), Some(22.0));
    let full = full_path(&grid, &engine);
    assert_eq!(path_cost(&full), 22.0);
    assert!(full.iter().all(|&p| !grid.is_barrier(p)));
}

#[test]
fn corner_rule_shapes_the_path() {
    // (1,1) -> (2,2) is flanked by one barrier at (1,2).
    let mut grid = Grid::from_ascii(
        "S.#..
         ..#..
         #....
         ...#.
         ...#E",
    )
    .unwrap();
    let engine = search(&mut grid, Topology::EightDirectional);
    assert_eq!(engine.state(), SearchState::Found);
    assert!(grid.neighbors(Point::new(1, 1)).contains(&Point::new(2, 2)));

    // Close the other flank: the corner is sealed and so is the start.
    grid.set_role(Point::new(2, 1), Role::Barrier).unwrap();
    let engine = search(&mut grid, Topology::EightDirectional);
    assert!(!grid.neighbors(Point::new(1, 1)).contains(&Point::new(2, 2)));
    assert_eq!(engine.state(), SearchState::Exhausted);
}

#[test]
fn exhaustion_is_a_state_not_an_error() {
    let mut grid = Grid::from_ascii(
        "S#.
         ##.
         ..E",
    )
    .unwrap();
    refresh_all(&mut grid, Topology::EightDirectional);
    let mut engine = SearchEngine::new();
    engine
        .initialize_marked(&grid, Topology::EightDirectional)
        .unwrap();
    let mut states = Vec::new();
    loop {
        let state = engine.step(&grid).unwrap();
        states.push(state);
        if state.is_terminal() {
            break;
        }
    }
    assert_eq!(states, vec![SearchState::Running, SearchState::Exhausted]);
}

#[test]
fn markers_track_the_frontier() {
    let mut grid = Grid::from_ascii(
        "S....
         .....
         .....
         .....
         ....E",
    )
    .unwrap();
    refresh_all(&mut grid, Topology::FourDirectional);
    let mut engine = SearchEngine::new();
    engine
        .initialize_marked(&grid, Topology::FourDirectional)
        .unwrap();

    while engine.step(&grid).unwrap() == SearchState::Running {
        let open = grid.iter().filter(|c| engine.is_open(c.pos())).count();
        assert_eq!(open, engine.frontier_len());
        for cell in grid.iter() {
            if engine.is_open(cell.pos()) {
                assert_eq!(engine.marker(cell.pos()), Marker::Frontier);
            }
        }
    }
    assert_eq!(engine.state(), SearchState::Found);
}

#[test]
fn reconstruct_before_found_is_an_error() {
    let mut grid = Grid::from_ascii(
        "S..
         ...
         ..E",
    )
    .unwrap();
    refresh_all(&mut grid, Topology::FourDirectional);
    let mut engine = SearchEngine::new();
    assert!(matches!(
        engine.reconstruct_path(),
        Err(SearchError::NoPathRecorded(_))
    ));
    engine
        .initialize_marked(&grid, Topology::FourDirectional)
        .unwrap();
    engine.step(&grid).unwrap();
    assert!(matches!(
        engine.reconstruct_path(),
        Err(SearchError::NoPathRecorded(_))
    ));
}
