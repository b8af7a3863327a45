//! Letter sequences labelling the MGRS 100km squares. Both skip I and O
//! and wrap around at their last letter.

use num::Integer;

const COLUMN_LETTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const ROW_LETTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUV";

/// UTM zones are grouped into this many recurring 100km letter sets.
pub(crate) const SET_COUNT: i32 = 6;

// Letters of the south west square for sets 1 to 6
const SET_ORIGIN_COLUMNS: [usize; SET_COUNT as usize] = [
    index_of(COLUMN_LETTERS, b'A'),
    index_of(COLUMN_LETTERS, b'J'),
    index_of(COLUMN_LETTERS, b'S'),
    index_of(COLUMN_LETTERS, b'A'),
    index_of(COLUMN_LETTERS, b'J'),
    index_of(COLUMN_LETTERS, b'S'),
];

const SET_ORIGIN_ROWS: [usize; SET_COUNT as usize] = [
    index_of(ROW_LETTERS, b'A'),
    index_of(ROW_LETTERS, b'F'),
    index_of(ROW_LETTERS, b'A'),
    index_of(ROW_LETTERS, b'F'),
    index_of(ROW_LETTERS, b'A'),
    index_of(ROW_LETTERS, b'F'),
];

const fn index_of(letters: &[u8], letter: u8) -> usize {
    let mut i = 0;
    while i < letters.len() {
        if letters[i] == letter {
            return i;
        }
        i += 1;
    }
    panic!("origin letter missing from alphabet");
}

/// Returns the 100km letter set, in `1..=6`, used by a UTM zone.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn set_for_zone(zone: i32) -> usize {
    (zone - 1).mod_floor(&SET_COUNT) as usize + 1
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Alphabet {
    /// Easting letters, `A` to `Z`
    Column,
    /// Northing letters, `A` to `V`
    Row,
}

impl Alphabet {
    fn letters(self) -> &'static [u8] {
        match self {
            Alphabet::Column => COLUMN_LETTERS,
            Alphabet::Row => ROW_LETTERS,
        }
    }

    fn origin(self, set: usize) -> usize {
        match self {
            Alphabet::Column => SET_ORIGIN_COLUMNS[set - 1],
            Alphabet::Row => SET_ORIGIN_ROWS[set - 1],
        }
    }

    /// The letter `steps` places after the origin letter of `set`.
    pub(crate) fn letter(self, set: usize, steps: i64) -> char {
        let letters = self.letters();
        #[allow(clippy::cast_possible_wrap)]
        let len = letters.len() as i64;
        #[allow(clippy::cast_possible_wrap)]
        let start = self.origin(set) as i64;
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let idx = (start + steps).mod_floor(&len) as usize;

        char::from(letters[idx])
    }

    /// Walks forward from the origin letter of `set` and counts the steps
    /// needed to reach `letter`. Gives up after wrapping around twice.
    pub(crate) fn steps_to(self, set: usize, letter: char) -> Option<usize> {
        let letters = self.letters();
        let start = self.origin(set);

        (0..2 * letters.len())
            .find(|step| char::from(letters[(start + step) % letters.len()]) == letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_sets_cycle_every_six_zones() {
        assert_eq!(set_for_zone(1), 1);
        assert_eq!(set_for_zone(6), 6);
        assert_eq!(set_for_zone(7), 1);
        assert_eq!(set_for_zone(32), 2);
        assert_eq!(set_for_zone(60), 6);
    }

    #[test]
    fn letters_skip_i_and_o() {
        // Set 1 columns start at A, so the 9th letter is J rather than I
        assert_eq!(Alphabet::Column.letter(1, 7), 'H');
        assert_eq!(Alphabet::Column.letter(1, 8), 'J');
        assert_eq!(Alphabet::Column.letter(2, 5), 'P');
        assert_eq!(Alphabet::Row.letter(1, 8), 'J');
        assert_eq!(Alphabet::Row.letter(1, 13), 'P');
    }

    #[test]
    fn letters_wrap_around() {
        assert_eq!(Alphabet::Column.letter(3, 7), 'Z');
        assert_eq!(Alphabet::Column.letter(3, 8), 'A');
        // Even sets start rows at F, so V is followed by A
        assert_eq!(Alphabet::Row.letter(2, 14), 'V');
        assert_eq!(Alphabet::Row.letter(2, 15), 'A');
        assert_eq!(Alphabet::Row.letter(2, 19), 'E');
    }

    #[test]
    fn walking_inverts_lookup() {
        for set in 1..=6 {
            for steps in 0..24 {
                let letter = Alphabet::Column.letter(set, steps);
                assert_eq!(Alphabet::Column.steps_to(set, letter), Some(steps as usize));
            }
            for steps in 0..20 {
                let letter = Alphabet::Row.letter(set, steps);
                assert_eq!(Alphabet::Row.steps_to(set, letter), Some(steps as usize));
            }
        }
    }

    #[test]
    fn walking_rejects_letters_outside_alphabet() {
        assert_eq!(Alphabet::Column.steps_to(1, 'I'), None);
        assert_eq!(Alphabet::Column.steps_to(3, 'O'), None);
        assert_eq!(Alphabet::Column.steps_to(1, '7'), None);
        assert_eq!(Alphabet::Row.steps_to(2, 'W'), None);
        assert_eq!(Alphabet::Row.steps_to(1, 'Z'), None);
    }
}
