use rand::Rng;

pub type MenuItem = &'static str;

/// The fixed menu every order is drawn from
pub static MENU: [MenuItem; 10] = [
    "BensChilli",
    "BensHalfSmoke",
    "BensHotDog",
    "BensChilliCheeseFries",
    "BensShake",
    "BensHotCakes",
    "BensCake",
    "BensHamburger",
    "BensVeggieBurger",
    "BensOnionRings",
];

/// Pick a menu item uniformly at random using the thread-local generator
pub fn pick_random_menu_item() -> MenuItem {
    pick_menu_item_with(&mut rand::thread_rng())
}

/// Pick a menu item with a caller-supplied generator
pub fn pick_menu_item_with<R: Rng + ?Sized>(rng: &mut R) -> MenuItem {
    MENU[rng.gen_range(0..MENU.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn random_pick_is_always_on_the_menu() {
        for _ in 0..200 {
            assert!(MENU.contains(&pick_random_menu_item()));
        }
    }

    #[test]
    fn seeded_picks_are_reproducible_and_cover_the_menu() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first: Vec<_> = (0..500).map(|_| pick_menu_item_with(&mut a)).collect();
        let second: Vec<_> = (0..500).map(|_| pick_menu_item_with(&mut b)).collect();
        assert_eq!(first, second);

        let seen: HashSet<_> = first.into_iter().collect();
        assert_eq!(seen.len(), MENU.len());
    }
}
