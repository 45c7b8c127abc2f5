//! Byte rotation with a shift cycling 1, 3, 5, 7

fn shifts() -> impl Iterator<Item = u32> {
    std::iter::successors(Some(1u32), |shift| Some((shift + 2) & 7))
}

pub fn encode(data: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(shifts())
        .map(|(&byte, shift)| byte.rotate_left(shift))
        .collect()
}

pub fn decode(data: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(shifts())
        .map(|(&byte, shift)| byte.rotate_right(shift))
        .collect()
}
