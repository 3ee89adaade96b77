/// Keys the row drills are built from, in teaching order.
pub const HOME_ROW: &[char] = &['a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', ';'];
pub const TOP_ROW: &[char] = &['q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p'];
pub const BOTTOM_ROW: &[char] = &['z', 'x', 'c', 'v', 'b', 'n', 'm', ',', '.'];

/// Shifted keys unlocked progressively during the mastery mix.
pub const SHIFTED_KEYS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ!@#$%^&*()_+{}|:\"<>?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Row {
    Home,
    Top,
    Bottom,
}

impl Row {
    pub fn keys(self) -> &'static [char] {
        match self {
            Row::Home => HOME_ROW,
            Row::Top => TOP_ROW,
            Row::Bottom => BOTTOM_ROW,
        }
    }
}

/// Every letter key of the three drilled rows.
pub fn all_row_keys() -> Vec<char> {
    [HOME_ROW, TOP_ROW, BOTTOM_ROW].concat()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalKey {
    pub base: char,
    pub shifted: char,
}

const fn key(base: char, shifted: char) -> PhysicalKey {
    PhysicalKey { base, shifted }
}

/// US QWERTY printable keys, row by row.
pub const QWERTY: &[PhysicalKey] = &[
    key('`', '~'),
    key('1', '!'),
    key('2', '@'),
    key('3', '#'),
    key('4', '$'),
    key('5', '%'),
    key('6', '^'),
    key('7', '&'),
    key('8', '*'),
    key('9', '('),
    key('0', ')'),
    key('-', '_'),
    key('=', '+'),
    key('q', 'Q'),
    key('w', 'W'),
    key('e', 'E'),
    key('r', 'R'),
    key('t', 'T'),
    key('y', 'Y'),
    key('u', 'U'),
    key('i', 'I'),
    key('o', 'O'),
    key('p', 'P'),
    key('[', '{'),
    key(']', '}'),
    key('\\', '|'),
    key('a', 'A'),
    key('s', 'S'),
    key('d', 'D'),
    key('f', 'F'),
    key('g', 'G'),
    key('h', 'H'),
    key('j', 'J'),
    key('k', 'K'),
    key('l', 'L'),
    key(';', ':'),
    key('\'', '"'),
    key('z', 'Z'),
    key('x', 'X'),
    key('c', 'C'),
    key('v', 'V'),
    key('b', 'B'),
    key('n', 'N'),
    key('m', 'M'),
    key(',', '<'),
    key('.', '>'),
    key('/', '?'),
];

/// Whether producing `ch` on QWERTY requires holding shift.
pub fn is_shifted(ch: char) -> bool {
    QWERTY.iter().any(|k| k.shifted == ch)
}

/// The physical key carrying `ch` on either layer.
pub fn physical_key(ch: char) -> Option<PhysicalKey> {
    QWERTY.iter().copied().find(|k| k.base == ch || k.shifted == ch)
}
