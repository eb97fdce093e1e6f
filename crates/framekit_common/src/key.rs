/// Platform-independent key codes. Backends map their native codes onto
/// this set and report everything else as `Key::None`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Key {
    #[default]
    None,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Left,
    Right,
    Up,
    Down,
    Space,
    Return,
    Escape,
    Backspace,
    Tab,
}
