//! Typewriter demo - run with: cargo run --example typing
//!
//! Drives the headline effect through one full cycle of the portfolio
//! roles on a manual clock, printing each display frame with the time
//! it would appear on screen.

use std::time::Duration;

use termfolio::content;
use termfolio::page::Page;
use termfolio::schedule::TimerQueue;
use termfolio::typing::TypingEffect;

fn main() {
    let site = content::default_site();
    let mut page = Page::new();
    let host = page.create_in(page.body());

    let mut effect = TypingEffect::new(Some(host), site.roles.clone());
    let mut timers = TimerQueue::new();
    effect.start(&mut timers, Duration::ZERO);

    println!("Roles: {:?}", site.roles);
    println!();

    let last_role = site.roles.len() - 1;
    while let Some(due) = timers.next_due() {
        timers.pop_due(due);
        let before = effect.role_index();
        effect.step(&mut page, &mut timers, due);
        println!("{:>6} ms  |{}|", due.as_millis(), page.text(host));

        // The index wraps to zero once the final role has been erased.
        if before == last_role && effect.role_index() == 0 {
            break;
        }
    }
}
