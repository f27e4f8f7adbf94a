use crate::clock::Clock;
use itertools::Itertools;
use log::*;
use rooms::{Result, RoomGraph, RoomsError, UserPath};
use std::io::{BufRead, Write};

pub const TIME_COMMAND: &str = "time";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Choice {
    Time,
    Move(usize),
    Unknown,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    AtRoom(usize),
    ServicingTimeRequest(usize),
    Finished,
}

/// Walks a loaded graph from its start room to its end room, recording every room entered.
#[derive(Debug)]
pub struct Navigator<'g> {
    graph: &'g RoomGraph,
    end: usize,
    current: usize,
    path: UserPath,
}
impl<'g> Navigator<'g> {
    pub fn new(graph: &'g RoomGraph) -> Result<Self> {
        let start = graph
            .start()
            .ok_or_else(|| RoomsError::invalid("no start room"))?;
        let end = graph
            .end()
            .ok_or_else(|| RoomsError::invalid("no end room"))?;
        Ok(Navigator {
            graph,
            end,
            current: start,
            path: UserPath::new(),
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn path(&self) -> &UserPath {
        &self.path
    }

    pub fn is_finished(&self) -> bool {
        self.current == self.end
    }

    /// Only the time command and neighbours of the current room are understood.
    pub fn choose(&self, input: &str) -> Choice {
        if input == TIME_COMMAND {
            return Choice::Time;
        }
        self.graph
            .neighbors(self.current)
            .find(|room| room.name() == input)
            .map_or(Choice::Unknown, |room| Choice::Move(room.index()))
    }

    /// Applies one line of input, moving only when it names a neighbour.
    pub fn step(&mut self, input: &str) -> Choice {
        let choice = self.choose(input);
        if let Choice::Move(next) = choice {
            debug!(
                "{} -> {}",
                self.graph.room(self.current).name(),
                self.graph.room(next).name()
            );
            self.current = next;
            self.path.push(next);
        }
        choice
    }

    /// Runs the prompt loop until the end room is entered and returns the path taken.
    pub fn run(
        mut self,
        mut input: impl BufRead,
        mut output: impl Write,
        clock: &impl Clock,
    ) -> Result<UserPath> {
        let mut state = self.state();
        loop {
            state = match state {
                State::AtRoom(room) => {
                    self.show(room, &mut output).map_err(RoomsError::Output)?;
                    let line = read_line(&mut input)?;
                    match self.step(&line) {
                        Choice::Time => State::ServicingTimeRequest(room),
                        Choice::Move(_) => self.state(),
                        Choice::Unknown => {
                            debug!("not understood: {:?}", line);
                            write!(output, "\nHUH? I DON'T UNDERSTAND THAT ROOM. TRY AGAIN.\n")
                                .map_err(RoomsError::Output)?;
                            State::AtRoom(room)
                        }
                    }
                }
                State::ServicingTimeRequest(room) => {
                    debug!("time requested in {}", self.graph.room(room).name());
                    let time = clock.current_time()?;
                    write!(output, "\n{}\n", time).map_err(RoomsError::Output)?;
                    State::AtRoom(room)
                }
                State::Finished => break,
            }
        }
        self.report(&mut output).map_err(RoomsError::Output)?;
        info!("finished in {} steps", self.path.len());
        Ok(self.path)
    }

    fn state(&self) -> State {
        if self.is_finished() {
            State::Finished
        } else {
            State::AtRoom(self.current)
        }
    }

    fn show(&self, room: usize, output: &mut impl Write) -> std::io::Result<()> {
        write!(
            output,
            "\nCURRENT LOCATION: {}\nPOSSIBLE CONNECTIONS: {}.\nWHERE TO? >",
            self.graph.room(room).name(),
            self.graph.connection_names(room).join(", ")
        )?;
        output.flush()
    }

    fn report(&self, output: &mut impl Write) -> std::io::Result<()> {
        write!(output, "\nYOU'VE FOUND THE END ROOM. CONGRATULATIONS!\n")?;
        writeln!(
            output,
            "YOU TOOK {} STEPS. YOUR PATH TO VICTORY WAS:",
            self.path.len()
        )?;
        self.path
            .names(self.graph)
            .try_for_each(|name| writeln!(output, "{}", name))?;
        output.flush()
    }
}

/// One line without its terminator. End of input is an error since the end room was not reached.
fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line).map_err(RoomsError::Input)? == 0 {
        return Err(RoomsError::InputClosed);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimeService;
    use rooms::fixtures::lettered_graph;
    use rooms::RoomKind;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    struct FixedClock {
        calls: Cell<usize>,
    }
    impl Clock for FixedClock {
        fn current_time(&self) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok("1:03pm, Tuesday, September 13, 2016".to_owned())
        }
    }

    fn clock() -> FixedClock {
        FixedClock {
            calls: Cell::new(0),
        }
    }

    fn run(graph: &RoomGraph, input: &str, clock: &impl Clock) -> (Result<UserPath>, String) {
        let mut output = Vec::new();
        let path = Navigator::new(graph)
            .unwrap()
            .run(input.as_bytes(), &mut output, clock);
        (path, String::from_utf8(output).unwrap())
    }

    fn names(graph: &RoomGraph, path: &UserPath) -> Vec<String> {
        path.names(graph).map(str::to_owned).collect()
    }

    #[test]
    fn walks_to_the_end() {
        let graph = lettered_graph();
        let (path, output) = run(&graph, "C\nE\nG\n", &clock());
        let path = path.unwrap();
        assert_eq!(names(&graph, &path), vec!["C", "E", "G"]);
        assert_eq!(path.len(), 3);
        assert!(output.starts_with(
            "\nCURRENT LOCATION: A\nPOSSIBLE CONNECTIONS: B, C, D.\nWHERE TO? >"
        ));
        assert!(output.contains("\nCURRENT LOCATION: C\nPOSSIBLE CONNECTIONS: A, E, F.\n"));
        assert!(output.ends_with(
            "\nYOU'VE FOUND THE END ROOM. CONGRATULATIONS!\n\
             YOU TOOK 3 STEPS. YOUR PATH TO VICTORY WAS:\n\
             C\nE\nG\n"
        ));
        assert!(!output.contains("CURRENT LOCATION: G"));
    }

    #[test]
    fn non_neighbor_is_not_understood() {
        let graph = lettered_graph();
        let (path, output) = run(&graph, "E\nB\nG\n", &clock());
        assert_eq!(names(&graph, &path.unwrap()), vec!["B", "G"]);
        let huh = "\nHUH? I DON'T UNDERSTAND THAT ROOM. TRY AGAIN.\n";
        assert_eq!(output.matches(huh).count(), 1);
        assert_eq!(output.matches("CURRENT LOCATION: A\n").count(), 2);
        assert!(output.contains(&format!(
            "WHERE TO? >{}\nCURRENT LOCATION: A\n",
            huh
        )));
    }

    #[test]
    fn unknown_and_miscased_names_do_not_move() {
        let graph = lettered_graph();
        let mut navigator = Navigator::new(&graph).unwrap();
        for input in ["", "Z", "b", " B", "B ", "TIME", "A"] {
            assert_eq!(navigator.step(input), Choice::Unknown, "{:?}", input);
            assert_eq!(navigator.current(), 0);
            assert!(navigator.path().is_empty());
        }
        assert_eq!(navigator.step("B"), Choice::Move(1));
        assert_eq!(navigator.current(), 1);
        assert_eq!(navigator.path().len(), 1);
    }

    #[test]
    fn revisits_count_as_steps() {
        let graph = lettered_graph();
        let (path, output) = run(&graph, "B\nA\nB\nG\n", &clock());
        let path = path.unwrap();
        assert_eq!(names(&graph, &path), vec!["B", "A", "B", "G"]);
        assert!(output.contains("YOU TOOK 4 STEPS."));
    }

    #[test]
    fn time_request_keeps_room_and_path() {
        let graph = lettered_graph();
        let clock = clock();
        let (path, output) = run(&graph, "time\nB\ntime\nG\n", &clock);
        assert_eq!(names(&graph, &path.unwrap()), vec!["B", "G"]);
        assert_eq!(clock.calls.get(), 2);
        assert!(output.contains(
            "WHERE TO? >\n1:03pm, Tuesday, September 13, 2016\n\nCURRENT LOCATION: A\n"
        ));
        assert!(output.contains("YOU TOOK 2 STEPS."));
    }

    #[test]
    fn time_file_matches_displayed_time() {
        let dir = TempDir::new().unwrap();
        let service = TimeService::in_dir(dir.path());
        let graph = lettered_graph();
        let (path, output) = run(&graph, "time\nB\nG\n", &service);
        path.unwrap();
        let written = fs::read_to_string(service.path()).unwrap();
        assert!(output.contains(&format!("WHERE TO? >\n{}\n", written)));
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let graph = lettered_graph();
        let (path, _) = run(&graph, "B\r\nG\r\n", &clock());
        assert_eq!(path.unwrap().len(), 2);
    }

    #[test]
    fn closed_input_is_fatal() {
        let graph = lettered_graph();
        let (path, output) = run(&graph, "C\nE\n", &clock());
        assert!(matches!(path, Err(RoomsError::InputClosed)));
        assert!(output.ends_with("POSSIBLE CONNECTIONS: C, D, G.\nWHERE TO? >"));
    }

    #[test]
    fn needs_start_and_end() {
        let mut graph = RoomGraph::new();
        graph.add_room("A");
        assert!(Navigator::new(&graph).is_err());
        graph.set_kind(0, RoomKind::Start);
        assert!(Navigator::new(&graph).is_err());
    }
}
