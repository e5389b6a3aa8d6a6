//! Interactive menu model.
//!
//! Parses a user's menu selection, knows which arguments each selection
//! prompts for, and dispatches to `FileManager`. Terminal I/O lives in the
//! binary; everything here is plain data so it can be tested directly.

use std::fmt;
use std::str::FromStr;

use crate::manager::FileManager;
use crate::outcome::OperationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListFiles,
    CreateFile,
    DeleteFile,
    RenameFile,
    MoveFile,
    CopyFile,
    CreateDirectory,
    DeleteDirectory,
    RenameDirectory,
    MoveDirectory,
    CopyDirectory,
    ListDirectories,
    ToggleVerbosity,
    Exit,
    ReadFile,
    WriteFile,
    FileSize,
    Help,
}

impl MenuChoice {
    /// Numbered entries in display order.
    pub const NUMBERED: [MenuChoice; 17] = [
        MenuChoice::ListFiles,
        MenuChoice::CreateFile,
        MenuChoice::DeleteFile,
        MenuChoice::RenameFile,
        MenuChoice::MoveFile,
        MenuChoice::CopyFile,
        MenuChoice::CreateDirectory,
        MenuChoice::DeleteDirectory,
        MenuChoice::RenameDirectory,
        MenuChoice::MoveDirectory,
        MenuChoice::CopyDirectory,
        MenuChoice::ListDirectories,
        MenuChoice::ToggleVerbosity,
        MenuChoice::Exit,
        MenuChoice::ReadFile,
        MenuChoice::WriteFile,
        MenuChoice::FileSize,
    ];

    pub fn number(self) -> Option<usize> {
        Self::NUMBERED.iter().position(|&c| c == self).map(|i| i + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ListFiles => "List files",
            MenuChoice::CreateFile => "Create file",
            MenuChoice::DeleteFile => "Delete file",
            MenuChoice::RenameFile => "Rename file",
            MenuChoice::MoveFile => "Move file",
            MenuChoice::CopyFile => "Copy file",
            MenuChoice::CreateDirectory => "Create directory",
            MenuChoice::DeleteDirectory => "Delete directory",
            MenuChoice::RenameDirectory => "Rename directory",
            MenuChoice::MoveDirectory => "Move directory",
            MenuChoice::CopyDirectory => "Copy directory",
            MenuChoice::ListDirectories => "List directories",
            MenuChoice::ToggleVerbosity => "Toggle verbosity",
            MenuChoice::Exit => "Exit",
            MenuChoice::ReadFile => "Read file",
            MenuChoice::WriteFile => "Write file",
            MenuChoice::FileSize => "File size",
            MenuChoice::Help => "Help",
        }
    }

    /// Prompts for the arguments this choice needs, in order.
    pub fn prompts(self) -> &'static [&'static str] {
        match self {
            MenuChoice::CreateFile => &["Enter the name of the file you would like to create: "],
            MenuChoice::DeleteFile => &["Enter the name of the file you would like to delete: "],
            MenuChoice::RenameFile => &[
                "Enter the name of the file you would like to rename: ",
                "Enter the new name for the file: ",
            ],
            MenuChoice::MoveFile => &[
                "Enter the name of the file you would like to move: ",
                "Enter the new path for the file: ",
            ],
            MenuChoice::CopyFile => &[
                "Enter the name of the file you would like to copy: ",
                "Enter the new path for the file: ",
            ],
            MenuChoice::CreateDirectory => {
                &["Enter the name of the directory you would like to create: "]
            }
            MenuChoice::DeleteDirectory => {
                &["Enter the name of the directory you would like to delete: "]
            }
            MenuChoice::RenameDirectory => &[
                "Enter the name of the directory you would like to rename: ",
                "Enter the new name for the directory: ",
            ],
            MenuChoice::MoveDirectory => &[
                "Enter the name of the directory you would like to move: ",
                "Enter the new path for the directory: ",
            ],
            MenuChoice::CopyDirectory => &[
                "Enter the name of the directory you would like to copy: ",
                "Enter the new path for the directory: ",
            ],
            MenuChoice::ReadFile => &["Enter the path of the file you would like to read: "],
            MenuChoice::WriteFile => &[
                "Enter the path of the file you would like to write: ",
                "Enter the content to write: ",
            ],
            MenuChoice::FileSize => &["Enter the path of the file you would like to measure: "],
            MenuChoice::ListFiles
            | MenuChoice::ListDirectories
            | MenuChoice::ToggleVerbosity
            | MenuChoice::Exit
            | MenuChoice::Help => &[],
        }
    }

    /// Prepare the answer to prompt `index`. Names and paths are trimmed;
    /// file content is kept exactly as typed.
    pub fn argument(self, index: usize, line: &str) -> String {
        match (self, index) {
            (MenuChoice::WriteFile, 1) => line.to_string(),
            _ => line.trim().to_string(),
        }
    }

    /// Parse a menu number or a word alias (case-insensitive, surrounding
    /// whitespace ignored).
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim().to_ascii_lowercase();
        if let Ok(n) = s.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Self::NUMBERED.get(i).copied());
        }
        let choice = match s.as_str() {
            "help" | "?" => MenuChoice::Help,
            "list" | "ls" => MenuChoice::ListFiles,
            "create" => MenuChoice::CreateFile,
            "delete" => MenuChoice::DeleteFile,
            "rename" => MenuChoice::RenameFile,
            "move" => MenuChoice::MoveFile,
            "copy" => MenuChoice::CopyFile,
            "create_dir" | "mkdir" => MenuChoice::CreateDirectory,
            "delete_dir" => MenuChoice::DeleteDirectory,
            "rename_dir" => MenuChoice::RenameDirectory,
            "move_dir" => MenuChoice::MoveDirectory,
            "copy_dir" => MenuChoice::CopyDirectory,
            "list_dirs" => MenuChoice::ListDirectories,
            "verbose" => MenuChoice::ToggleVerbosity,
            "exit" | "quit" | "q" => MenuChoice::Exit,
            "read" => MenuChoice::ReadFile,
            "write" => MenuChoice::WriteFile,
            "size" => MenuChoice::FileSize,
            _ => return None,
        };
        Some(choice)
    }
}

impl FromStr for MenuChoice {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| INVALID_CHOICE.to_string())
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(n) => write!(f, "{}. {}", n, self.label()),
            None => f.write_str(self.label()),
        }
    }
}

pub const WELCOME: &str = "Welcome to the File Management System!";
pub const INVALID_CHOICE: &str = "Invalid choice. Please try again.";
pub const GOODBYE: &str = "Exiting the application.";

pub const HELP_TEXT: &str = "\
    1. List files - Lists all entries in the managed directory.
    2. Create file - Creates a new, empty file.
    3. Delete file - Deletes a file.
    4. Rename file - Renames a file.
    5. Move file - Moves a file into a directory, or to a new path.
    6. Copy file - Copies a file; existing names get a _copyN suffix.
    7. Create directory - Creates a new directory.
    8. Delete directory - Deletes a directory and everything in it.
    9. Rename directory - Renames a directory.
    10. Move directory - Moves a directory into another directory, or to a new path.
    11. Copy directory - Copies a directory tree; existing names get a _copyN suffix.
    12. List directories - Lists the directories in the managed directory.
    13. Toggle verbosity - Toggle verbose mode on or off.
    14. Exit - Exits the application.
    15. Read file - Prints the contents of a text file.
    16. Write file - Replaces the contents of a file.
    17. File size - Prints the size of a file in bytes.

    Choices can also be typed as words: list, create, delete, rename, move, copy,
    create_dir, delete_dir, rename_dir, move_dir, copy_dir, list_dirs, verbose,
    read, write, size, exit.";

/// Menu as printed before each prompt.
pub fn menu_text() -> String {
    let mut lines: Vec<String> = MenuChoice::NUMBERED.iter().map(|c| c.to_string()).collect();
    lines.push("Type 'help' for more information.".to_string());
    lines.join("\n")
}

/// What the front end should show after a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Result(OperationResult),
    Listing { title: String, items: Vec<String> },
    Text(String),
    Exit,
}

/// Run `choice` with already-collected `args` (one per prompt).
pub fn dispatch(fm: &mut FileManager, choice: MenuChoice, args: &[String]) -> Response {
    let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or("");
    match choice {
        MenuChoice::ListFiles => Response::Listing {
            title: format!("Files in {}:", fm.root().display()),
            items: fm.list_files(),
        },
        MenuChoice::ListDirectories => Response::Listing {
            title: "Directories in the current directory:".to_string(),
            items: fm.list_directories(),
        },
        MenuChoice::CreateFile => Response::Result(fm.create_file(arg(0))),
        MenuChoice::DeleteFile => Response::Result(fm.delete_file(arg(0))),
        MenuChoice::RenameFile => Response::Result(fm.rename_file(arg(0), arg(1))),
        MenuChoice::MoveFile => Response::Result(fm.move_file(arg(0), arg(1))),
        MenuChoice::CopyFile => Response::Result(fm.copy_file(arg(0), arg(1))),
        MenuChoice::CreateDirectory => Response::Result(fm.create_directory(arg(0))),
        MenuChoice::DeleteDirectory => Response::Result(fm.delete_directory(arg(0))),
        MenuChoice::RenameDirectory => Response::Result(fm.rename_directory(arg(0), arg(1))),
        MenuChoice::MoveDirectory => Response::Result(fm.move_directory(arg(0), arg(1))),
        MenuChoice::CopyDirectory => Response::Result(fm.copy_directory(arg(0), arg(1))),
        MenuChoice::ToggleVerbosity => {
            let on = fm.toggle_verbose();
            Response::Text(format!("Verbose mode set to {}.", if on { "on" } else { "off" }))
        }
        MenuChoice::ReadFile => {
            let res = fm.document(arg(0)).read();
            Response::Result(match res {
                Ok(content) => OperationResult::success(content),
                Err(e) => e.into(),
            })
        }
        MenuChoice::WriteFile => {
            // A write inside the root may add an entry.
            let res = fm.document(arg(0)).write(arg(1)).and_then(|msg| fm.refresh().map(|()| msg));
            Response::Result(match res {
                Ok(msg) => OperationResult::success(msg),
                Err(e) => e.into(),
            })
        }
        MenuChoice::FileSize => {
            let doc = fm.document(arg(0));
            Response::Result(match doc.size() {
                Ok(n) => OperationResult::success(format!("{}: {} bytes", doc.path().display(), n))
                    .with_payload(n.to_string()),
                Err(e) => e.into(),
            })
        }
        MenuChoice::Help => Response::Text(HELP_TEXT.to_string()),
        MenuChoice::Exit => Response::Exit,
    }
}
