use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
    Thumb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerAssignment {
    pub hand: Hand,
    pub finger: Finger,
}

impl FingerAssignment {
    pub fn new(hand: Hand, finger: Finger) -> Self {
        Self { hand, finger }
    }
}

impl fmt::Display for FingerAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.finger == Finger::Thumb {
            return write!(f, "Thumb");
        }
        let hand = match self.hand {
            Hand::Left => "L",
            Hand::Right => "R",
        };
        let finger = match self.finger {
            Finger::Pinky => "Pinky",
            Finger::Ring => "Ring",
            Finger::Middle => "Middle",
            Finger::Index => "Index",
            Finger::Thumb => "Thumb",
        };
        write!(f, "{hand}-{finger}")
    }
}

/// Finger responsible for a QWERTY key, either layer. `None` for keys off the
/// printable block.
pub fn qwerty_finger(ch: char) -> Option<FingerAssignment> {
    use Finger::*;
    use Hand::*;

    let assignment = match ch.to_ascii_lowercase() {
        '`' | '~' | '1' | '!' | 'q' | 'a' | 'z' => FingerAssignment::new(Left, Pinky),
        '2' | '@' | 'w' | 's' | 'x' => FingerAssignment::new(Left, Ring),
        '3' | '#' | 'e' | 'd' | 'c' => FingerAssignment::new(Left, Middle),
        '4' | '$' | '5' | '%' | 'r' | 't' | 'f' | 'g' | 'v' | 'b' => {
            FingerAssignment::new(Left, Index)
        }
        '6' | '^' | '7' | '&' | 'y' | 'u' | 'h' | 'j' | 'n' | 'm' => {
            FingerAssignment::new(Right, Index)
        }
        '8' | '*' | 'i' | 'k' | ',' | '<' => FingerAssignment::new(Right, Middle),
        '9' | '(' | 'o' | 'l' | '.' | '>' => FingerAssignment::new(Right, Ring),
        '0' | ')' | '-' | '_' | '=' | '+' | 'p' | '[' | '{' | ']' | '}' | '\\' | '|' | ';'
        | ':' | '\'' | '"' | '/' | '?' => FingerAssignment::new(Right, Pinky),
        ' ' => FingerAssignment::new(Right, Thumb),
        _ => return None,
    };
    Some(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_row_anchors() {
        assert_eq!(
            qwerty_finger('f'),
            Some(FingerAssignment::new(Hand::Left, Finger::Index))
        );
        assert_eq!(
            qwerty_finger('J'),
            Some(FingerAssignment::new(Hand::Right, Finger::Index))
        );
        assert_eq!(
            qwerty_finger(':'),
            Some(FingerAssignment::new(Hand::Right, Finger::Pinky))
        );
    }

    #[test]
    fn unknown_key_has_no_finger() {
        assert_eq!(qwerty_finger('é'), None);
    }

    #[test]
    fn labels() {
        assert_eq!(qwerty_finger('a').unwrap().to_string(), "L-Pinky");
        assert_eq!(qwerty_finger(' ').unwrap().to_string(), "Thumb");
    }
}
