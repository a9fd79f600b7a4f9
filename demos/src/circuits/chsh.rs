//! The CHSH Bell-inequality game.
//!
//! Two referees each flip a coin (`x` for Alice, `y` for Bob) and the
//! players answer `a` and `b` without communicating. The players win when
//! `a ⊕ b = x ∧ y`. Any classical strategy wins at most 75% of rounds;
//! players sharing a Bell pair reach `cos²(π/8) ≈ 85.4%`.

use entangle_ir::{Circuit, IrResult, QubitId};
use entangle_sim::{RunResult, SimError, SimResult};

/// Best classical win rate.
pub const CLASSICAL_WIN_RATE: f64 = 0.75;

/// Optimal quantum win rate, `cos²(π/8)`.
pub const QUANTUM_WIN_RATE: f64 = 0.853_553_390_593_273_8;

/// Alice's half of the shared Bell pair.
pub const ALICE: QubitId = QubitId(0);
/// Bob's half of the shared Bell pair.
pub const BOB: QubitId = QubitId(1);
/// Coin deciding Alice's measurement basis.
pub const ALICE_REFEREE: QubitId = QubitId(2);
/// Coin deciding Bob's measurement basis.
pub const BOB_REFEREE: QubitId = QubitId(3);

/// Measurement keys for Alice's answer, Bob's answer and the two coins.
pub const KEYS: [&str; 4] = ["a", "b", "x", "y"];

/// Tally of a CHSH run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChshScore {
    /// Rounds where `a ⊕ b = x ∧ y`.
    pub wins: usize,
    /// Rounds played.
    pub rounds: usize,
}

impl ChshScore {
    /// Fraction of rounds won, zero for an empty run.
    pub fn win_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.wins as f64 / self.rounds as f64
        }
    }

    /// Whether the win rate exceeds [`CLASSICAL_WIN_RATE`].
    pub fn beats_classical(&self) -> bool {
        self.win_rate() > CLASSICAL_WIN_RATE
    }
}

/// The CHSH game played by four qubits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChshGame;

impl ChshGame {
    /// Build one round of the game.
    ///
    /// The referees' coins are Hadamard-prepared qubits that control a
    /// quarter-turn of each player's measurement basis.
    pub fn circuit() -> IrResult<Circuit> {
        let mut circuit = Circuit::new(4)?.with_name("chsh");

        circuit
            .h(ALICE)?
            .cx(ALICE, BOB)?
            .x_pow(-0.25, ALICE)?
            .h(ALICE_REFEREE)?
            .h(BOB_REFEREE)?
            .cx_pow(0.5, ALICE_REFEREE, ALICE)?
            .cx_pow(0.5, BOB_REFEREE, BOB)?;

        for (key, qubit) in KEYS.into_iter().zip([ALICE, BOB, ALICE_REFEREE, BOB_REFEREE]) {
            circuit.measure(key, [qubit])?;
        }
        Ok(circuit)
    }

    /// Whether one round with answers `(a, b)` and coins `(x, y)` is won.
    pub fn wins(a: bool, b: bool, x: bool, y: bool) -> bool {
        (a ^ b) == (x && y)
    }

    /// Count the rounds won in `result`.
    pub fn score(result: &RunResult) -> SimResult<ChshScore> {
        let a = column(result, KEYS[0])?;
        let b = column(result, KEYS[1])?;
        let x = column(result, KEYS[2])?;
        let y = column(result, KEYS[3])?;
        let wins = (0..result.shots())
            .filter(|&i| Self::wins(a[i][0], b[i][0], x[i][0], y[i][0]))
            .count();
        Ok(ChshScore {
            wins,
            rounds: result.shots(),
        })
    }
}

/// Per-shot bits recorded under `key`.
fn column<'a>(result: &'a RunResult, key: &str) -> SimResult<&'a [Vec<bool>]> {
    result
        .samples(key)
        .ok_or_else(|| SimError::UnknownKey(key.to_string()))
}
