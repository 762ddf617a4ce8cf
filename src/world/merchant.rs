use crate::config::GameConfig;
use crate::errors::{ActionError, ActionResult};
use crate::world::inventory::{BallKind, Item};
use crate::world::player::Player;

/// A shop with a fixed price list. Critters are bought back at a flat rate
/// per level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merchant {
    stock: Vec<(Item, u32)>,
    worth_per_level: u32,
}

impl Merchant {
    pub fn new(stock: Vec<(Item, u32)>, worth_per_level: u32) -> Self {
        Self {
            stock,
            worth_per_level,
        }
    }

    /// Potions and standard balls at the configured prices.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            vec![
                (Item::Potion, config.potion_cost),
                (Item::Ball(BallKind::Standard), config.ball_cost),
            ],
            config.critter_worth_per_level,
        )
    }

    pub fn stock(&self) -> &[(Item, u32)] {
        &self.stock
    }

    pub fn price(&self, item: Item) -> Option<u32> {
        self.stock
            .iter()
            .find(|(stocked, _)| *stocked == item)
            .map(|(_, price)| *price)
    }

    /// Buy `quantity` of `item`. Returns the total paid.
    pub fn buy(&self, player: &mut Player, item: Item, quantity: u32) -> ActionResult<u32> {
        let price = self.price(item).ok_or(ActionError::ItemNotAvailable(item))?;
        let total = price.checked_mul(quantity).unwrap_or(u32::MAX);
        if total > player.money {
            return Err(ActionError::NotEnoughMoney {
                required: total,
                available: player.money,
            });
        }
        player.money -= total;
        player.inventory.add(item, quantity);
        log::info!("{} bought {} x{} for {}", player.name, item, quantity, total);
        Ok(total)
    }

    /// Sell the critter in `roster_index`. Returns the amount paid.
    pub fn sell_critter(&self, player: &mut Player, roster_index: usize) -> ActionResult<u32> {
        let level = player
            .critter(roster_index)
            .ok_or(ActionError::InvalidRosterSlot(roster_index))?
            .level();
        if player.critters.len() <= 1 {
            return Err(ActionError::CannotSellLastCritter);
        }
        let sold = player
            .remove_critter(roster_index)
            .ok_or(ActionError::InvalidRosterSlot(roster_index))?;
        let worth = self.worth_per_level.saturating_mul(level);
        player.money = player.money.saturating_add(worth);
        log::info!("{} sold {} for {}", player.name, sold.name, worth);
        Ok(worth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_player, fixture_reference, TestCritterBuilder};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn merchant() -> Merchant {
        Merchant::from_config(&GameConfig::default())
    }

    #[rstest]
    #[case(Item::Potion, 2, 600, 200)]
    #[case(Item::Ball(BallKind::Standard), 3, 600, 0)]
    fn test_buy_deducts_cost(
        #[case] item: Item,
        #[case] quantity: u32,
        #[case] money: u32,
        #[case] expected_money: u32,
    ) {
        let mut player = create_test_player(Vec::new());
        player.money = money;
        let paid = merchant().buy(&mut player, item, quantity).unwrap();
        assert_eq!(paid, money - expected_money);
        assert_eq!(player.money, expected_money);
        assert_eq!(player.inventory.count(item), quantity);
    }

    #[test]
    fn test_buy_rejected_without_funds() {
        let mut player = create_test_player(Vec::new());
        player.money = 399;
        let result = merchant().buy(&mut player, Item::Potion, 2);
        assert_eq!(
            result,
            Err(ActionError::NotEnoughMoney {
                required: 400,
                available: 399
            })
        );
        assert_eq!(player.money, 399);
        assert_eq!(player.inventory.count(Item::Potion), 0);
    }

    #[test]
    fn test_unstocked_item_is_rejected() {
        let mut player = create_test_player(Vec::new());
        player.money = 10_000;
        let result = merchant().buy(&mut player, Item::Ball(BallKind::Ultra), 1);
        assert_eq!(result, Err(ActionError::ItemNotAvailable(Item::Ball(BallKind::Ultra))));
    }

    #[test]
    fn test_sell_pays_by_level_and_reindexes() {
        let reference = fixture_reference();
        let mut player = create_test_player(vec![
            TestCritterBuilder::new(4, 5).build(&reference),
            TestCritterBuilder::new(1, 12).build(&reference),
            TestCritterBuilder::new(7, 5).build(&reference),
        ]);

        assert_eq!(merchant().sell_critter(&mut player, 1), Ok(600));
        assert_eq!(player.money, 600);
        assert_eq!(player.critters.len(), 2);
        assert_eq!(player.active_order, vec![0, 1]);
        assert_eq!(player.critters[1].species_id, 7);
    }

    #[test]
    fn test_cannot_sell_the_last_critter() {
        let reference = fixture_reference();
        let mut player = create_test_player(vec![TestCritterBuilder::new(4, 5).build(&reference)]);
        assert_eq!(
            merchant().sell_critter(&mut player, 0),
            Err(ActionError::CannotSellLastCritter)
        );
        assert_eq!(
            merchant().sell_critter(&mut player, 3),
            Err(ActionError::InvalidRosterSlot(3))
        );
        assert_eq!(player.critters.len(), 1);
    }
}
