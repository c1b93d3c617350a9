use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_minimax::{Chip, GameState, Player, HEIGHT, WIDTH};

fn chip_color(chip: Chip) -> Color {
    match chip {
        Chip::Red => Color::Red,
        Chip::Black => Color::Black,
        Chip::None => Color::DarkBlue,
    }
}

/// Draws the board top row first, under a 1-based column header
pub fn draw(state: &GameState) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for row in (0..HEIGHT).rev() {
        for column in 0..WIDTH {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(chip_color(state.board().chip(column, row))),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Prints "<Name>'s Turn" in the player's colour
pub fn turn_banner(player: Player) -> Result<()> {
    let mut stdout = stdout();
    stdout.queue(PrintStyledContent(
        style(format!("{}'s Turn\n", player))
            .attribute(Attribute::Bold)
            .with(chip_color(player.chip())),
    ))?;
    stdout.flush()?;
    Ok(())
}
