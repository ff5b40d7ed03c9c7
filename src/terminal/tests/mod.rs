//! Terminal emulator tests.
//!
//! Organized by handler category:
//! - cursor: Cursor movement
//! - scroll: Scroll region behavior
//! - editing: Erase/delete operations
//! - style: SGR color/attribute parsing
//! - replay: Full sequence replay through the `Terminal` trait

use std::time::{Duration, Instant};

use super::{Color, Terminal, TerminalBuffer, BLINK_INTERVAL};

fn term(width: usize, height: usize, data: &str) -> TerminalBuffer {
    let mut buf = TerminalBuffer::new(width, height);
    buf.process(data);
    buf
}

fn line(buf: &TerminalBuffer, row: usize) -> String {
    buf.styled_lines()[row].text()
}

mod cursor {
    use super::*;

    #[test]
    fn plain_text_advances_cursor() {
        let buf = term(10, 3, "abc");
        assert_eq!(line(&buf, 0), "abc");
        assert_eq!(buf.cursor_col(), 3);
        assert_eq!(buf.cursor_row(), 0);
    }

    #[test]
    fn cr_lf_moves_to_next_line_start() {
        let buf = term(10, 3, "ab\r\ncd");
        assert_eq!(line(&buf, 0), "ab");
        assert_eq!(line(&buf, 1), "cd");
        assert_eq!((buf.cursor_row(), buf.cursor_col()), (1, 2));
    }

    #[test]
    fn bare_lf_keeps_column() {
        let buf = term(10, 3, "ab\ncd");
        assert_eq!(line(&buf, 1), "  cd");
    }

    #[test]
    fn cursor_position_is_one_based() {
        let buf = term(10, 5, "\x1b[3;4Hx");
        assert_eq!(line(&buf, 2), "   x");
    }

    #[test]
    fn relative_moves_clamp_to_screen() {
        let buf = term(5, 3, "\x1b[10B\x1b[10C\x1b[2D");
        assert_eq!((buf.cursor_row(), buf.cursor_col()), (2, 2));
    }

    #[test]
    fn backspace_overwrites_previous_char() {
        let buf = term(10, 2, "ab\x08c");
        assert_eq!(line(&buf, 0), "ac");
    }

    #[test]
    fn tab_moves_to_next_stop() {
        let buf = term(20, 2, "a\tb");
        assert_eq!(line(&buf, 0), "a       b");
    }

    #[test]
    fn long_line_wraps() {
        let buf = term(4, 3, "abcdef");
        assert_eq!(line(&buf, 0), "abcd");
        assert_eq!(line(&buf, 1), "ef");
    }

    #[test]
    fn save_and_restore_cursor() {
        let buf = term(10, 3, "ab\x1b7\r\nxyz\x1b8c");
        assert_eq!(line(&buf, 0), "abc");
    }

    #[test]
    fn dectcem_hides_cursor() {
        let buf = term(10, 3, "\x1b[?25l");
        assert!(!buf.cursor_visible());
        assert!(!buf.cursor_shown(Instant::now()));
    }

    #[test]
    fn wide_char_takes_two_cells() {
        let buf = term(10, 2, "日x");
        let row = buf.row(0).unwrap();
        assert_eq!(row[0].char, '日');
        assert!(row[1].is_spacer());
        assert_eq!(row[2].char, 'x');
        assert_eq!(line(&buf, 0), "日x");
    }
}

mod scroll {
    use super::*;

    #[test]
    fn linefeed_at_bottom_scrolls() {
        let buf = term(5, 2, "one\r\ntwo\r\nthree");
        assert_eq!(line(&buf, 0), "two");
        assert_eq!(line(&buf, 1), "three");
    }

    #[test]
    fn scroll_region_limits_scrolling() {
        // Region rows 2-3 of 3; row 1 is a fixed header
        let buf = term(6, 3, "head\x1b[2;3r\x1b[2;1Ha\r\nb\r\nc");
        assert_eq!(line(&buf, 0), "head");
        assert_eq!(line(&buf, 1), "b");
        assert_eq!(line(&buf, 2), "c");
    }

    #[test]
    fn reverse_index_at_top_scrolls_down() {
        let buf = term(5, 3, "a\r\nb\x1b[H\x1bM");
        assert_eq!(line(&buf, 0), "");
        assert_eq!(line(&buf, 1), "a");
        assert_eq!(line(&buf, 2), "b");
    }

    #[test]
    fn scroll_up_sequence() {
        let buf = term(5, 3, "a\r\nb\r\nc\x1b[1S");
        assert_eq!(line(&buf, 0), "b");
        assert_eq!(line(&buf, 1), "c");
        assert_eq!(line(&buf, 2), "");
    }
}

mod editing {
    use super::*;

    #[test]
    fn erase_display_clears_everything() {
        let buf = term(5, 2, "abc\r\ndef\x1b[2J");
        assert_eq!(buf.to_string(), "");
    }

    #[test]
    fn erase_line_to_end() {
        let buf = term(10, 1, "abcdef\x1b[4G\x1b[K");
        assert_eq!(line(&buf, 0), "abc");
    }

    #[test]
    fn erase_line_to_start() {
        let buf = term(10, 1, "abcdef\x1b[3G\x1b[1K");
        assert_eq!(line(&buf, 0), "   def");
    }

    #[test]
    fn delete_chars_shifts_left() {
        let buf = term(10, 1, "abcdef\x1b[2G\x1b[2P");
        assert_eq!(line(&buf, 0), "adef");
    }

    #[test]
    fn insert_chars_shifts_right() {
        let buf = term(10, 1, "abc\x1b[1G\x1b[2@");
        assert_eq!(line(&buf, 0), "  abc");
    }

    #[test]
    fn insert_and_delete_lines() {
        let buf = term(5, 3, "a\r\nb\r\nc\x1b[2H\x1b[L");
        assert_eq!(line(&buf, 1), "");
        assert_eq!(line(&buf, 2), "b");

        let buf = term(5, 3, "a\r\nb\r\nc\x1b[1H\x1b[M");
        assert_eq!(line(&buf, 0), "b");
        assert_eq!(line(&buf, 1), "c");
    }
}

mod style {
    use super::*;

    #[test]
    fn basic_foreground_and_reset() {
        let buf = term(10, 1, "\x1b[31mr\x1b[0mn");
        let row = buf.row(0).unwrap();
        assert_eq!(row[0].style.fg, Color::Red);
        assert_eq!(row[1].style.fg, Color::Default);
    }

    #[test]
    fn attributes_are_tracked() {
        let buf = term(10, 1, "\x1b[1;4;7mx");
        let style = buf.row(0).unwrap()[0].style;
        assert!(style.bold && style.underline && style.reverse);
        assert!(!style.italic);
    }

    #[test]
    fn indexed_and_rgb_colors() {
        let buf = term(10, 1, "\x1b[38;5;196ma\x1b[48;2;1;2;3mb");
        let row = buf.row(0).unwrap();
        assert_eq!(row[0].style.fg, Color::Indexed(196));
        assert_eq!(row[1].style.bg, Color::Rgb(1, 2, 3));
        assert_eq!(row[1].style.fg, Color::Indexed(196));
    }

    #[test]
    fn bright_colors() {
        let buf = term(10, 1, "\x1b[92;104mx");
        let style = buf.row(0).unwrap()[0].style;
        assert_eq!(style.fg, Color::BrightGreen);
        assert_eq!(style.bg, Color::BrightBlue);
    }
}

mod replay {
    use super::*;

    #[test]
    fn escape_sequence_split_across_writes() {
        let mut buf = TerminalBuffer::new(10, 1);
        buf.write("\x1b[3");
        buf.write("1mx");
        assert_eq!(buf.row(0).unwrap()[0].style.fg, Color::Red);
        assert_eq!(line(&buf, 0), "x");
    }

    #[test]
    fn reset_clears_screen_and_cursor() {
        let mut buf = TerminalBuffer::new(10, 2);
        buf.write("hello\r\nworld");
        buf.reset();
        assert_eq!(buf.to_string(), "");
        assert_eq!((buf.cursor_row(), buf.cursor_col()), (0, 0));
        assert_eq!((buf.width(), buf.height()), (10, 2));
    }

    #[test]
    fn display_trims_trailing_blank_rows() {
        let buf = term(10, 5, "$ ls\r\nfile.txt\r\n");
        insta::assert_snapshot!(buf.to_string(), @r"
        $ ls
        file.txt
        ");
    }

    #[test]
    fn blink_alternates_cursor_visibility() {
        let mut buf = TerminalBuffer::new(4, 1);
        let now = Instant::now();
        assert!(buf.cursor_shown(now));

        buf.start_blink();
        assert!(buf.is_blinking());
        let later = Instant::now() + BLINK_INTERVAL + Duration::from_millis(10);
        let even_later = later + BLINK_INTERVAL;
        assert_ne!(buf.cursor_shown(later), buf.cursor_shown(even_later));

        buf.stop_blink();
        assert!(!buf.is_blinking());
        assert!(buf.cursor_shown(later));
    }

    #[test]
    fn resize_keeps_top_left_content() {
        let mut buf = term(10, 3, "abcdef\r\nghi");
        buf.resize(3, 1);
        assert_eq!(buf.to_string(), "abc");
    }
}
