pub mod assertions;
pub mod test_fixture;
