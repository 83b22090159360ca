//! Given steps for compose BDD scenarios.

use super::world::ComposeWorld;
use rstest_bdd_macros::given;

#[given("a compose session for the general channel")]
fn compose_session(world: &mut ComposeWorld) -> eyre::Result<()> {
    world.start_session()
}
