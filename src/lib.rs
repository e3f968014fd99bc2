// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! chutes-sim: a Monte-Carlo simulator for chutes and ladders.
//!
//! A game is played on a track of squares numbered from zero up to a goal. Some squares start a
//! link: a chute sends a player who lands there back down the board, a ladder carries them
//! further up. Every player rolls a six-sided die on their turn, and the first player to reach
//! or pass the goal wins. This library plays many such games with a deterministic, seedable
//! generator and aggregates who won and how long it took, so that different movement
//! [`Variant`]s can be compared:
//!
//! - [`Variant::Standard`] simply moves by its roll;
//! - [`Variant::Resilient`] takes extra steps on the turn after sliding down a chute;
//! - [`Variant::Lazy`] drops steps on the turn after climbing a ladder.
//!
//! Squares are generic over any signed primitive integer (see [`SquareValue`]), so the same
//! engine can run on small `i16` tracks or oversized `i64` ones.

#![no_std]

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::error::Error;
use core::fmt::{Debug, Display, Formatter};
use core::hash::Hash;
use core::mem;
use core::str::FromStr;
use log::{debug, info, trace, warn};
use num_traits::{PrimInt, Signed};
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

extern crate alloc;

/// The number of faces on the die every player rolls.
pub const DIE_FACES: u8 = 6;

/// The goal of the standard board.
pub const STANDARD_GOAL: u8 = 90;

/// The chutes of the standard board, as `(start, destination)` pairs.
pub const STANDARD_CHUTES: [(u8, u8); 7] = [
    (24, 5),
    (33, 3),
    (42, 30),
    (56, 37),
    (64, 27),
    (74, 12),
    (87, 70),
];

/// The ladders of the standard board, as `(start, destination)` pairs.
pub const STANDARD_LADDERS: [(u8, u8); 7] = [
    (1, 40),
    (8, 10),
    (36, 52),
    (43, 62),
    (49, 79),
    (65, 82),
    (68, 85),
];

/// Marker trait: specifies that a value may be used for squares, offsets and carry amounts.
pub trait SquareValue:
    PrimInt
    + Signed
    + From<u8>
    + Hash
    + Debug
    + Display
    + Serialize
    + DeserializeOwned
    + 'static
{
}

impl<V> SquareValue for V where
    V: PrimInt
        + Signed
        + From<u8>
        + Hash
        + Debug
        + Display
        + Serialize
        + DeserializeOwned
        + 'static
{
}

/// The kind of link placed on a board.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum LinkKind {
    /// A link which moves a player to a lower square.
    Chute,
    /// A link which moves a player to a higher square.
    Ladder,
}

impl Display for LinkKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            LinkKind::Chute => "chute",
            LinkKind::Ladder => "ladder",
        })
    }
}

/// A type of invalid board, associated with an [`InvalidBoardError`].
#[derive(Debug)]
pub enum InvalidBoardType<V> {
    /// The goal is zero or negative.
    NonPositiveGoal,
    /// The square starts more than one link, either within one table or across both.
    DuplicateStart,
    /// The link starts before the first square or at or beyond the goal.
    StartOutOfRange(LinkKind),
    /// The link leads back to its own start.
    SelfLink(LinkKind),
    /// The link ends before the first square or beyond the goal.
    DestinationOutOfRange(LinkKind, V),
    /// A chute which leads up, or a ladder which leads down.
    WrongDirection(LinkKind, V),
    /// The link ends on the start of another link.
    Chained(LinkKind, V),
}

/// An error which denotes that a board could not be constructed from the provided tables.
#[derive(Debug)]
pub struct InvalidBoardError<V> {
    square: V,
    variant: InvalidBoardType<V>,
}

impl<V> InvalidBoardError<V> {
    /// The square (or, for [`InvalidBoardType::NonPositiveGoal`], the goal) at fault.
    pub fn square(&self) -> &V {
        &self.square
    }

    /// What was wrong with the square.
    pub fn variant(&self) -> &InvalidBoardType<V> {
        &self.variant
    }
}

impl<V> Display for InvalidBoardError<V>
where
    V: SquareValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let square = self.square;
        match &self.variant {
            InvalidBoardType::NonPositiveGoal => {
                f.write_fmt(format_args!("goal {square} must be positive"))
            }
            InvalidBoardType::DuplicateStart => {
                f.write_fmt(format_args!("square {square} starts more than one link"))
            }
            InvalidBoardType::StartOutOfRange(kind) => f.write_fmt(format_args!(
                "{kind} starting at {square} lies outside the playable squares"
            )),
            InvalidBoardType::SelfLink(kind) => {
                f.write_fmt(format_args!("{kind} at {square} leads back to itself"))
            }
            InvalidBoardType::DestinationOutOfRange(kind, to) => f.write_fmt(format_args!(
                "{kind} from {square} leads to {to}, which is not on the board"
            )),
            InvalidBoardType::WrongDirection(kind, to) => f.write_fmt(format_args!(
                "{kind} from {square} to {to} leads the wrong way"
            )),
            InvalidBoardType::Chained(kind, to) => f.write_fmt(format_args!(
                "{kind} from {square} ends on {to}, which starts another link"
            )),
        }
    }
}

impl<V> Error for InvalidBoardError<V> where V: SquareValue {}

/// The serialized form of a [`Board`]. Missing tables or goal fall back to the standard board,
/// exactly as with [`Board::new`].
#[derive(Clone, Debug, Deserialize, Serialize)]
struct BoardTables<V> {
    goal: Option<V>,
    chutes: Option<Vec<(V, V)>>,
    ladders: Option<Vec<(V, V)>>,
}

/// A board: a goal square and the chutes and ladders placed before it. A board is immutable once
/// constructed and is shared by reference between every player of every game.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(
    try_from = "BoardTables<V>",
    into = "BoardTables<V>",
    bound(serialize = "V: SquareValue", deserialize = "V: SquareValue")
)]
pub struct Board<V> {
    goal: V,
    chutes: BTreeMap<V, V>,
    ladders: BTreeMap<V, V>,
    links: BTreeMap<V, V>,
}

fn standard_table<V: SquareValue>(table: &[(u8, u8)]) -> Vec<(V, V)> {
    table
        .iter()
        .map(|&(start, end)| -> (V, V) { (start.into(), end.into()) })
        .collect()
}

fn check_links<V>(goal: V, tables: [(LinkKind, &[(V, V)]); 2]) -> Result<(), InvalidBoardError<V>>
where
    V: SquareValue,
{
    if goal <= V::zero() {
        return Err(InvalidBoardError {
            square: goal,
            variant: InvalidBoardType::NonPositiveGoal,
        });
    }
    let mut starts = BTreeSet::new();
    for (kind, table) in tables {
        for &(start, end) in table {
            let variant = if !starts.insert(start) {
                InvalidBoardType::DuplicateStart
            } else if start < V::one() || start >= goal {
                InvalidBoardType::StartOutOfRange(kind)
            } else if start == end {
                InvalidBoardType::SelfLink(kind)
            } else if end < V::zero() || end > goal {
                InvalidBoardType::DestinationOutOfRange(kind, end)
            } else if (kind == LinkKind::Chute) != (end < start) {
                InvalidBoardType::WrongDirection(kind, end)
            } else {
                continue;
            };
            return Err(InvalidBoardError {
                square: start,
                variant,
            });
        }
    }
    for (kind, table) in tables {
        if let Some(&(start, end)) = table.iter().find(|(_, end)| starts.contains(end)) {
            return Err(InvalidBoardError {
                square: start,
                variant: InvalidBoardType::Chained(kind, end),
            });
        }
    }
    Ok(())
}

impl<V> Board<V>
where
    V: SquareValue,
{
    /// Create a board from the provided chutes, ladders and goal. Any table or goal which is not
    /// provided is taken from the standard board, so a custom chute table is still paired with
    /// the standard ladders unless ladders are provided as well.
    pub fn new(
        chutes: Option<&[(V, V)]>,
        ladders: Option<&[(V, V)]>,
        goal: Option<V>,
    ) -> Result<Self, InvalidBoardError<V>> {
        let default_chutes;
        let chutes = match chutes {
            Some(chutes) => chutes,
            None => {
                default_chutes = standard_table(&STANDARD_CHUTES);
                default_chutes.as_slice()
            }
        };
        let default_ladders;
        let ladders = match ladders {
            Some(ladders) => ladders,
            None => {
                default_ladders = standard_table(&STANDARD_LADDERS);
                default_ladders.as_slice()
            }
        };
        let goal = goal.unwrap_or_else(|| STANDARD_GOAL.into());
        check_links(goal, [(LinkKind::Chute, chutes), (LinkKind::Ladder, ladders)])?;
        Ok(Self::assemble(goal, chutes, ladders))
    }

    /// The standard 90-square board with seven chutes and seven ladders.
    pub fn standard() -> Self {
        Self::assemble(
            STANDARD_GOAL.into(),
            &standard_table(&STANDARD_CHUTES),
            &standard_table(&STANDARD_LADDERS),
        )
    }

    fn assemble(goal: V, chutes: &[(V, V)], ladders: &[(V, V)]) -> Self {
        let chutes: BTreeMap<V, V> = chutes.iter().copied().collect();
        let ladders: BTreeMap<V, V> = ladders.iter().copied().collect();
        let links = chutes.iter().chain(ladders.iter()).map(|(&s, &e)| (s, e)).collect();
        Self {
            goal,
            chutes,
            ladders,
            links,
        }
    }

    /// The square which must be reached (or passed) to win.
    pub fn goal(&self) -> V {
        self.goal
    }

    /// Whether the provided position has reached or passed the goal.
    pub fn has_reached_goal(&self, position: V) -> bool {
        position >= self.goal
    }

    /// The offset to apply to a player who lands on `position`: zero unless the square starts a
    /// link, otherwise the distance to the link's destination (negative for chutes).
    pub fn adjust(&self, position: V) -> V {
        self.links
            .get(&position)
            .map_or(V::zero(), |&end| end - position)
    }

    /// The destination of the link starting at `square`, if there is one.
    pub fn destination(&self, square: V) -> Option<V> {
        self.links.get(&square).copied()
    }

    /// Whether `square` starts a chute or ladder.
    pub fn is_link_start(&self, square: V) -> bool {
        self.links.contains_key(&square)
    }

    /// Every link on the board, chutes and ladders alike, keyed by start square.
    pub fn links(&self) -> &BTreeMap<V, V> {
        &self.links
    }

    /// The chutes on the board, keyed by start square.
    pub fn chutes(&self) -> &BTreeMap<V, V> {
        &self.chutes
    }

    /// The ladders on the board, keyed by start square.
    pub fn ladders(&self) -> &BTreeMap<V, V> {
        &self.ladders
    }
}

impl<V> Default for Board<V>
where
    V: SquareValue,
{
    fn default() -> Self {
        Self::standard()
    }
}

impl<V> TryFrom<BoardTables<V>> for Board<V>
where
    V: SquareValue,
{
    type Error = InvalidBoardError<V>;

    fn try_from(tables: BoardTables<V>) -> Result<Self, Self::Error> {
        Self::new(
            tables.chutes.as_deref(),
            tables.ladders.as_deref(),
            tables.goal,
        )
    }
}

impl<V> From<Board<V>> for BoardTables<V>
where
    V: SquareValue,
{
    fn from(board: Board<V>) -> Self {
        Self {
            goal: Some(board.goal),
            chutes: Some(board.chutes.into_iter().collect()),
            ladders: Some(board.ladders.into_iter().collect()),
        }
    }
}

impl<V> Display for Board<V>
where
    V: SquareValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "goal: {}", self.goal)?;
        for (name, table) in [("chutes", &self.chutes), ("ladders", &self.ladders)] {
            write!(f, "{name}:")?;
            for (start, end) in table {
                write!(f, " {start}->{end}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A player's movement behaviour.
#[derive(
    Copy, Clone, Debug, Default, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize, Serialize,
)]
pub enum Variant {
    /// Moves exactly by its roll.
    #[default]
    #[serde(rename = "Player")]
    Standard,
    /// After climbing a ladder, drops [`CarryRules::dropped_steps`] from its next roll.
    #[serde(rename = "LazyPlayer")]
    Lazy,
    /// After sliding down a chute, adds [`CarryRules::extra_steps`] to its next roll.
    #[serde(rename = "ResilientPlayer")]
    Resilient,
}

impl Variant {
    /// Every variant, in order.
    pub const ALL: [Variant; 3] = [Variant::Standard, Variant::Lazy, Variant::Resilient];

    /// The name of the variant as reported in results.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Standard => "Player",
            Variant::Lazy => "LazyPlayer",
            Variant::Resilient => "ResilientPlayer",
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// An error produced when parsing a [`Variant`] from an unrecognised name.
#[derive(Debug)]
pub struct UnknownVariantError;

impl Display for UnknownVariantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("expected one of Player, LazyPlayer or ResilientPlayer")
    }
}

impl Error for UnknownVariantError {}

impl FromStr for Variant {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.name() == s)
            .ok_or(UnknownVariantError)
    }
}

/// The carry-over amounts applied by the [`Variant::Resilient`] and [`Variant::Lazy`] players.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(
    default,
    bound(serialize = "V: SquareValue", deserialize = "V: SquareValue")
)]
pub struct CarryRules<V> {
    /// Steps added to a resilient player's roll on the turn after a chute.
    pub extra_steps: V,
    /// Steps removed from a lazy player's roll on the turn after a ladder.
    pub dropped_steps: V,
}

impl<V> Default for CarryRules<V>
where
    V: SquareValue,
{
    fn default() -> Self {
        Self {
            extra_steps: V::one(),
            dropped_steps: V::one(),
        }
    }
}

/// The record of a single completed turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Turn<V> {
    /// The face rolled.
    pub roll: u8,
    /// The carry applied to the roll: positive for a bonus, negative for a penalty.
    pub carry: V,
    /// The square reached by the roll, before any chute or ladder.
    pub landed: V,
    /// The offset applied by the board at `landed`.
    pub adjustment: V,
    /// The position at the end of the turn.
    pub position: V,
    /// Whether the player reached or passed the goal on this turn.
    pub reached_goal: bool,
}

/// Roll a fair die, uniformly over `1..=DIE_FACES`.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=DIE_FACES)
}

/// A single player in a single game.
#[derive(Clone, Debug)]
pub struct Player<'b, V> {
    board: &'b Board<V>,
    variant: Variant,
    rules: CarryRules<V>,
    position: V,
    moves_taken: usize,
    pending_carry: V,
}

impl<'b, V> Player<'b, V>
where
    V: SquareValue,
{
    /// Create a player of the provided variant at the start of the board.
    pub fn new(board: &'b Board<V>, variant: Variant, rules: CarryRules<V>) -> Self {
        Self {
            board,
            variant,
            rules,
            position: V::zero(),
            moves_taken: 0,
            pending_carry: V::zero(),
        }
    }

    /// The variant of this player.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The current position of this player.
    pub fn position(&self) -> V {
        self.position
    }

    /// The number of turns this player has completed.
    pub fn moves_taken(&self) -> usize {
        self.moves_taken
    }

    /// The carry which will be applied to this player's next roll, or zero if there is none.
    pub fn pending_carry(&self) -> V {
        self.pending_carry
    }

    /// Whether this player has reached the goal.
    pub fn has_won(&self) -> bool {
        self.board.has_reached_goal(self.position)
    }

    /// Roll the die and take a turn with the result.
    pub fn take_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Turn<V> {
        self.advance(roll_die(rng))
    }

    /// Take a turn with the provided roll.
    ///
    /// The pending carry is consumed, the player moves by the roll plus carry (never backwards),
    /// and the board's adjustment for the landing square is applied. A new carry is then set
    /// from that adjustment according to the player's variant; it only affects the next turn.
    ///
    /// A move past the largest representable square stops on that square, which is always at or
    /// beyond the goal.
    pub fn advance(&mut self, roll: u8) -> Turn<V> {
        let carry = mem::replace(&mut self.pending_carry, V::zero());
        let rolled: V = roll.into();
        let step = rolled
            .checked_add(&carry)
            .unwrap_or_else(V::max_value)
            .max(V::zero());
        let landed = self
            .position
            .checked_add(&step)
            .unwrap_or_else(V::max_value);
        let adjustment = self.board.adjust(landed);
        self.position = landed + adjustment;
        self.moves_taken += 1;

        self.pending_carry = match self.variant {
            Variant::Resilient if adjustment < V::zero() => self.rules.extra_steps,
            Variant::Lazy if adjustment > V::zero() => V::zero()
                .checked_sub(&self.rules.dropped_steps)
                .unwrap_or_else(V::min_value),
            _ => V::zero(),
        };

        Turn {
            roll,
            carry,
            landed,
            adjustment,
            position: self.position,
            reached_goal: self.has_won(),
        }
    }
}

/// The settings of a [`Simulation`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(
    default,
    bound(serialize = "V: SquareValue", deserialize = "V: SquareValue")
)]
pub struct Settings<V> {
    /// The seed of the generator which drives every roll and the optional shuffle.
    pub seed: u64,
    /// Whether to shuffle the field once when the simulation is constructed.
    pub randomize_field: bool,
    /// The carry-over amounts for the resilient and lazy variants.
    pub carry: CarryRules<V>,
    /// The number of rounds after which a game without a winner is abandoned, if any.
    pub max_rounds: Option<usize>,
}

impl<V> Default for Settings<V>
where
    V: SquareValue,
{
    fn default() -> Self {
        Self {
            seed: 1,
            randomize_field: false,
            carry: CarryRules::default(),
            max_rounds: None,
        }
    }
}

/// An error which denotes a misconfigured or failed simulation.
#[derive(Debug, Eq, PartialEq)]
pub enum SimulationError {
    /// The simulation was created without any players.
    EmptyField,
    /// A carry amount was negative.
    NegativeCarry,
    /// No player reached the goal within the configured number of rounds.
    DidNotConverge {
        /// The number of full rounds played when the game was abandoned.
        rounds: usize,
    },
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SimulationError::EmptyField => f.write_str("a simulation needs at least one player"),
            SimulationError::NegativeCarry => f.write_str("carry amounts must not be negative"),
            SimulationError::DidNotConverge { rounds } => f.write_fmt(format_args!(
                "simulation did not converge: no player reached the goal after {rounds} rounds"
            )),
        }
    }
}

impl Error for SimulationError {}

/// The outcome of a single game.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct GameResult {
    /// The number of moves the winner took.
    pub moves: usize,
    /// The variant of the winner.
    pub winner: Variant,
}

impl From<GameResult> for (usize, Variant) {
    fn from(result: GameResult) -> Self {
        (result.moves, result.winner)
    }
}

impl Display for GameResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("{} won in {} moves", self.winner, self.moves))
    }
}

/// Summary statistics over the winning move counts of one variant.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DurationSummary {
    /// The number of games won.
    pub games: usize,
    /// The fewest moves taken to win.
    pub shortest: usize,
    /// The most moves taken to win.
    pub longest: usize,
    /// The mean number of moves taken to win.
    pub mean: f64,
    /// The median number of moves taken to win.
    pub median: f64,
}

impl DurationSummary {
    /// Summarise the provided durations, or `None` if there are none.
    pub fn from_durations(durations: &[usize]) -> Option<Self> {
        let mut sorted = durations.to_vec();
        sorted.sort_unstable();
        let (&shortest, &longest) = (sorted.first()?, sorted.last()?);
        let games = sorted.len();
        let mean = sorted.iter().sum::<usize>() as f64 / games as f64;
        let mid = games / 2;
        let median = if games % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
        } else {
            sorted[mid] as f64
        };
        Some(Self {
            games,
            shortest,
            longest,
            mean,
            median,
        })
    }
}

impl Display for DurationSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!(
            "{} wins, {}-{} moves (mean {:.2}, median {:.1})",
            self.games, self.shortest, self.longest, self.mean, self.median
        ))
    }
}

/// A sequence of games played by a fixed field of players on a single board.
///
/// All randomness comes from one generator seeded at construction, so two simulations with the
/// same board, field and settings record identical results.
#[derive(Clone, Debug)]
pub struct Simulation<V> {
    board: Board<V>,
    field: Vec<Variant>,
    settings: Settings<V>,
    rng: ChaCha8Rng,
    results: Vec<GameResult>,
}

impl<V> Simulation<V>
where
    V: SquareValue,
{
    /// Create a simulation for the provided field, in seating order, on the provided board.
    pub fn new<F: Into<Vec<Variant>>>(
        field: F,
        board: Board<V>,
        settings: Settings<V>,
    ) -> Result<Self, SimulationError> {
        let mut field = field.into();
        if field.is_empty() {
            return Err(SimulationError::EmptyField);
        }
        if settings.carry.extra_steps < V::zero() || settings.carry.dropped_steps < V::zero() {
            return Err(SimulationError::NegativeCarry);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
        if settings.randomize_field {
            field.shuffle(&mut rng);
        }
        debug!(
            "new simulation with {} players on a board with goal {}",
            field.len(),
            board.goal()
        );
        Ok(Self {
            board,
            field,
            settings,
            rng,
            results: Vec::new(),
        })
    }

    /// Create a simulation on the standard board with default settings and the provided seed.
    pub fn standard<F: Into<Vec<Variant>>>(field: F, seed: u64) -> Result<Self, SimulationError> {
        Self::new(
            field,
            Board::standard(),
            Settings {
                seed,
                ..Settings::default()
            },
        )
    }

    /// The board games are played on.
    pub fn board(&self) -> &Board<V> {
        &self.board
    }

    /// The field, in seating order (after the shuffle, if one was requested).
    pub fn field(&self) -> &[Variant] {
        &self.field
    }

    /// The settings this simulation was created with.
    pub fn settings(&self) -> &Settings<V> {
        &self.settings
    }

    /// Every recorded game, in the order played.
    pub fn results(&self) -> &[GameResult] {
        &self.results
    }

    /// Play a single game to completion and record its outcome.
    ///
    /// Players take turns in seating order, and the first player to reach the goal wins
    /// immediately; later players in the same round do not get to move.
    pub fn run_one_game(&mut self) -> Result<GameResult, SimulationError> {
        let carry = self.settings.carry;
        let mut players: Vec<Player<'_, V>> = self
            .field
            .iter()
            .map(|&variant| Player::new(&self.board, variant, carry))
            .collect();

        let mut rounds = 0;
        loop {
            for (seat, player) in players.iter_mut().enumerate() {
                let turn = player.take_turn(&mut self.rng);
                trace!(
                    "seat {seat} ({}) rolled {} and moved to {}",
                    player.variant(),
                    turn.roll,
                    turn.position
                );
                if turn.reached_goal {
                    let result = GameResult {
                        moves: player.moves_taken(),
                        winner: player.variant(),
                    };
                    debug!("game {}: {result}", self.results.len() + 1);
                    self.results.push(result);
                    return Ok(result);
                }
            }
            rounds += 1;
            if self.settings.max_rounds.is_some_and(|limit| rounds >= limit) {
                warn!("abandoning game after {rounds} rounds without a winner");
                return Err(SimulationError::DidNotConverge { rounds });
            }
        }
    }

    /// Play `num_games` games, recording each outcome after those already recorded.
    pub fn run(&mut self, num_games: usize) -> Result<(), SimulationError> {
        for _ in 0..num_games {
            self.run_one_game()?;
        }
        info!(
            "played {num_games} games, {} recorded in total",
            self.results.len()
        );
        Ok(())
    }

    fn empty_tally<T: Default>(&self) -> BTreeMap<Variant, T> {
        self.field
            .iter()
            .map(|&variant| (variant, T::default()))
            .collect()
    }

    /// The number of recorded wins for every variant in the field, including those without any.
    pub fn wins_by_variant(&self) -> BTreeMap<Variant, usize> {
        let mut wins = self.empty_tally::<usize>();
        for result in &self.results {
            *wins.entry(result.winner).or_default() += 1;
        }
        wins
    }

    /// The winning move counts of every variant in the field, in the order the games were played.
    pub fn durations_by_variant(&self) -> BTreeMap<Variant, Vec<usize>> {
        let mut durations = self.empty_tally::<Vec<usize>>();
        for result in &self.results {
            durations
                .entry(result.winner)
                .or_default()
                .push(result.moves);
        }
        durations
    }

    /// The number of seats in the field occupied by each variant.
    pub fn players_by_variant(&self) -> BTreeMap<Variant, usize> {
        let mut players = self.empty_tally::<usize>();
        for &variant in &self.field {
            *players.entry(variant).or_default() += 1;
        }
        players
    }

    /// Summary statistics of the winning move counts of every variant in the field; `None` for
    /// variants which never won.
    pub fn duration_summary(&self) -> BTreeMap<Variant, Option<DurationSummary>> {
        self.durations_by_variant()
            .into_iter()
            .map(|(variant, durations)| (variant, DurationSummary::from_durations(&durations)))
            .collect()
    }
}
