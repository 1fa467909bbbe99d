use crate::cli::{commands::display_char, global::GlobalArgs};
use pfe_codec::{Codec, CodecConfig, PfeError};
use std::io::{self, BufRead, IsTerminal, Write};

const MENU: &str = "1. text -> pfe\n2. pfe -> text\n3. see dictionary\n4. leave\n";

pub fn handle(
    global: &GlobalArgs,
    config: &CodecConfig,
    codec: &Codec,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session {
        codec,
        lowercase: config.lowercase(),
        show_raw: config.show_raw(),
        clear: io::stdout().is_terminal() && !global.quiet,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(&mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Menu loop over any line source, so it can be driven from tests.
pub struct Session<'a> {
    codec: &'a Codec,
    lowercase: bool,
    show_raw: bool,
    clear: bool,
}

impl Session<'_> {
    /// Runs until the user leaves or the input ends.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> io::Result<()> {
        loop {
            self.clear_screen(out)?;
            writeln!(out, "{}", MENU)?;
            let Some(choice) = prompt(input, out, "> choose (1 - 4): ")? else {
                return Ok(());
            };

            let keep_going = match choice.trim() {
                "1" => self.encode(input, out)?,
                "2" => self.decode(input, out)?,
                "3" => self.dictionary(input, out)?,
                "4" => false,
                other => {
                    tracing::debug!(choice = other, "ignoring unknown menu choice");
                    true
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    fn encode<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> io::Result<bool> {
        self.clear_screen(out)?;
        writeln!(out, "(text -> pfe)\n")?;
        let Some(mut text) = prompt(input, out, "prompt: ")? else {
            return Ok(false);
        };
        if self.lowercase {
            text = text.to_lowercase();
        }

        match self.codec.encode_text_raw(&text) {
            Ok(raw) => {
                writeln!(out)?;
                if self.show_raw {
                    writeln!(out, "raw pfe: {}\n", raw)?;
                }
                writeln!(out, "simplified pfe: {}", self.codec.simplify_text(&raw))?;
            }
            Err(e) => report(out, &e)?,
        }
        pause(input, out)
    }

    fn decode<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> io::Result<bool> {
        self.clear_screen(out)?;
        writeln!(out, "(pfe -> text)\n")?;
        let Some(pfe) = prompt(input, out, "prompt: ")? else {
            return Ok(false);
        };

        match self.codec.decode_text(pfe.trim()) {
            Ok(text) => writeln!(out, "\ntext: {}", text)?,
            Err(e) => report(out, &e)?,
        }
        pause(input, out)
    }

    fn dictionary<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> io::Result<bool> {
        self.clear_screen(out)?;
        for (c, notation) in self.codec.table().iter() {
            writeln!(out, "{}: {}", display_char(c), notation)?;
        }
        pause(input, out)
    }

    #[cfg(feature = "cli")]
    fn clear_screen<W: Write>(&self, out: &mut W) -> io::Result<()> {
        use crossterm::{
            cursor::MoveTo,
            execute,
            terminal::{Clear, ClearType},
        };
        if self.clear {
            execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    #[cfg(not(feature = "cli"))]
    fn clear_screen<W: Write>(&self, _out: &mut W) -> io::Result<()> {
        Ok(())
    }
}

/// Prints `label` and reads one line without its line ending; `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

fn pause<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    Ok(prompt(input, out, "\npress enter to continue...")?.is_some())
}

fn report<W: Write>(out: &mut W, err: &PfeError) -> io::Result<()> {
    writeln!(out, "\n{}", err.plain())
}
