/// Five-round scenario where alice and bob survive every round.
///
/// `BALLOTS` is replaced with the `[votes]` table body, `CLAIM` with the
/// claim mode.
const FIVE_ROUNDS: &str = r#"
players = ["alice", "bob", "carol", "dave"]
stake = "1"
seed = 42
claim = "CLAIM"

[[rounds]]
winner = "A"
stakes = [
    { player = "alice", outcome = "A" },
    { player = "bob", outcome = "A" },
    { player = "carol", outcome = "B" },
    { player = "dave", outcome = "B", amount = "2" },
]

[[rounds]]
winner = "B"
stakes = [
    { player = "alice", outcome = "B" },
    { player = "bob", outcome = "B" },
]

[[rounds]]
winner = "A"
stakes = [
    { player = "alice", outcome = "A" },
    { player = "bob", outcome = "A" },
]

[[rounds]]
winner = "A"
stakes = [
    { player = "alice", outcome = "A" },
    { player = "bob", outcome = "A" },
]

[[rounds]]
winner = "B"
stakes = [
    { player = "alice", outcome = "B" },
    { player = "bob", outcome = "B" },
]

[votes]
BALLOTS
"#;

pub fn five_rounds(ballots: &str, claim: &str) -> String {
    FIVE_ROUNDS
        .replace("BALLOTS", ballots)
        .replace("CLAIM", claim)
}

/// Both finalists vote to split.
pub fn split_scenario() -> String {
    five_rounds("alice = 1\nbob = 1", "each")
}

/// Finalists disagree, so the draw decides.
pub fn draw_scenario() -> String {
    five_rounds("alice = 1\nbob = 2", "all")
}

pub const CONFIG: &str = r#"
[logging]
level = "warn"

[currency]
decimals = 2

[market]
fee_bps = 200

[tournament]
entry_fee = "1.00"
treasury_cut_bps = 1000

[roles]
owner = "owner"
oracles = ["oracle"]
"#;
