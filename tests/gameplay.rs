use rand::{rngs::StdRng, SeedableRng};

use tile_snake::{Advance, Board, Cell, Direction, GameState, Snake, Velocity};

const CELLS: u16 = 24;

fn game(snake: Snake, food: Cell, velocity: Velocity, seed: u64) -> GameState {
    GameState::from_parts(Board::new(CELLS), snake, food, velocity, StdRng::seed_from_u64(seed))
}

#[test]
fn body_length_only_changes_when_eating() {
    let snake = Snake::with_body(Cell::new(8, 8), vec![Cell::new(7, 8), Cell::new(6, 8)]);
    let mut state = game(snake, Cell::new(20, 3), Direction::Right.velocity(), 11);

    for _ in 0..30 {
        let before = state.snake().len();
        let head_on_food = state.snake().head() == state.food();

        let outcome = state.advance();

        let expected = if head_on_food { before + 1 } else { before };
        assert_eq!(state.snake().len(), expected);
        assert_eq!(outcome, Advance::Moved { ate: head_on_food });
        assert!(state.board().contains(state.food()));
    }
}

#[test]
fn eating_grows_by_one_and_respawns_food_on_the_board() {
    for seed in 0..50 {
        let mut state = game(Snake::new(Cell::new(4, 4)), Cell::new(4, 4), Direction::Down.velocity(), seed);

        assert_eq!(state.advance(), Advance::Moved { ate: true });
        assert_eq!(state.score(), 1);

        let food = state.food();
        assert!((0..CELLS as i32).contains(&food.x));
        assert!((0..CELLS as i32).contains(&food.y));
    }
}

#[test]
fn head_wraps_on_every_edge() {
    let last = CELLS as i32 - 1;
    let cases = [
        (Cell::new(last, 3), Direction::Right, Cell::new(0, 3)),
        (Cell::new(0, 3), Direction::Left, Cell::new(last, 3)),
        (Cell::new(3, last), Direction::Down, Cell::new(3, 0)),
        (Cell::new(3, 0), Direction::Up, Cell::new(3, last)),
    ];

    for (start, direction, expected) in cases.iter() {
        let mut state = game(Snake::new(*start), Cell::new(12, 12), direction.velocity(), 0);
        state.advance();
        assert_eq!(state.snake().head(), *expected, "moving {:?} from {:?}", direction, start);
    }
}

#[test]
fn biting_the_body_ends_the_game_and_freezes_state() {
    // Head at (5,5) heading left; after the shift the body will occupy (4,5).
    let snake = Snake::with_body(
        Cell::new(5, 5),
        vec![Cell::new(5, 6), Cell::new(4, 6), Cell::new(4, 5), Cell::new(4, 4)],
    );
    let mut state = game(snake, Cell::new(20, 20), Direction::Left.velocity(), 0);

    assert_eq!(state.advance(), Advance::GameOver { score: 4 });
    assert!(state.is_terminal());

    let snake = state.snake().clone();
    let food = state.food();
    for _ in 0..5 {
        assert_eq!(state.advance(), Advance::Halted);
    }
    assert_eq!(state.snake(), &snake);
    assert_eq!(state.food(), food);
}

#[test]
fn reversing_is_rejected() {
    let mut state = game(Snake::new(Cell::new(5, 5)), Cell::new(10, 10), Direction::Right.velocity(), 0);

    assert!(!state.steer(Direction::Left));
    assert_eq!(state.velocity(), Velocity { dx: 1, dy: 0 });
}

#[test]
fn right_five_ticks_reaches_the_food_column() {
    let mut state = game(Snake::new(Cell::new(5, 5)), Cell::new(10, 10), Velocity::STILL, 0);

    assert!(state.steer(Direction::Right));
    for _ in 0..5 {
        state.advance();
    }
    assert_eq!(state.snake().head(), Cell::new(10, 5));

    assert_eq!(state.advance(), Advance::Moved { ate: false });
    assert_eq!(state.snake().head(), Cell::new(11, 5));
    assert!(state.snake().is_empty());
    assert_eq!(state.food(), Cell::new(10, 10));
}

#[test]
fn stationary_snake_never_moves() {
    let mut state = game(Snake::new(Cell::new(5, 5)), Cell::new(10, 10), Velocity::STILL, 0);
    for _ in 0..10 {
        assert_eq!(state.advance(), Advance::Moved { ate: false });
    }
    assert_eq!(state.snake().head(), Cell::new(5, 5));
}
