pub mod common;


#[cfg(test)]
mod test_end_of_turn;
